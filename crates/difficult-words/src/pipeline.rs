//! End-to-end extraction: lexicon, corpus exports, filter, output.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use vocab_corpus::{Lexicon, aggregate, dedup_paths, discover_inputs};
use vocab_morphy::Lemmatizer;

use crate::filter::{DifficultyFilter, FilterConfig, FilterReport};
use crate::output::write_difficult_words;
use crate::stoplist::StopWords;

pub const DEFAULT_CANONICAL: &str = "Word_results.txt";
pub const DEFAULT_LEXICON: &str = "NGSL_1.2_stats.csv";
pub const DEFAULT_OUTPUT: &str = "difficult_words.csv";

#[derive(Clone, Debug)]
pub struct ExtractOptions {
    /// Explicit exports; when empty, exports are discovered in `corpus_dir`.
    pub inputs: Vec<PathBuf>,
    pub corpus_dir: PathBuf,
    pub canonical: String,
    pub lexicon: PathBuf,
    pub output: PathBuf,
    pub filter: FilterConfig,
    pub stoplist: Option<PathBuf>,
    pub exceptions: Option<PathBuf>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            corpus_dir: PathBuf::from("."),
            canonical: DEFAULT_CANONICAL.to_string(),
            lexicon: PathBuf::from(DEFAULT_LEXICON),
            output: PathBuf::from(DEFAULT_OUTPUT),
            filter: FilterConfig::default(),
            stoplist: None,
            exceptions: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ExtractSummary {
    pub inputs: Vec<PathBuf>,
    pub unique_words: usize,
    pub report: FilterReport,
}

/// Run the whole pipeline and write the ranked list to `options.output`.
pub fn run_extract(options: &ExtractOptions) -> Result<ExtractSummary> {
    let start = Instant::now();

    let lexicon = Lexicon::load(&options.lexicon)
        .with_context(|| format!("loading lexicon from {}", options.lexicon.display()))?;

    let mut stoplist = StopWords::default();
    if let Some(path) = &options.stoplist {
        let added = stoplist
            .extend_from_file(path)
            .with_context(|| format!("loading stoplist from {}", path.display()))?;
        info!("added {added} stop words from {}", path.display());
    }

    let mut lemmatizer = Lemmatizer::new();
    if let Some(path) = &options.exceptions {
        lemmatizer = lemmatizer.with_exceptions_file(path)?;
        info!(
            "irregular table has {} forms after {}",
            lemmatizer.irregular_count(),
            path.display()
        );
    }

    let inputs = if options.inputs.is_empty() {
        discover_inputs(&options.corpus_dir, &options.canonical)?
    } else {
        dedup_paths(options.inputs.iter().cloned())
    };
    let freqs = aggregate(&inputs).context("aggregating frequency exports")?;
    info!("corpus loaded in {} ms", start.elapsed().as_millis());

    let outcome =
        DifficultyFilter::new(options.filter, &stoplist, &lexicon, &lemmatizer).run(&freqs);
    write_difficult_words(&options.output, &outcome.words)?;
    info!("extraction finished in {} ms", start.elapsed().as_millis());

    Ok(ExtractSummary {
        inputs,
        unique_words: freqs.len(),
        report: outcome.report,
    })
}
