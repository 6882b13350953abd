use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use difficult_words::define::{self, DefineOptions, DictionaryApi, fetch_definitions};
use difficult_words::pipeline::{self, ExtractOptions, run_extract};
use difficult_words::{DEFAULT_FREQ_CEILING, DEFAULT_MIN_WORD_LEN, FilterConfig};

#[derive(Parser)]
#[command(name = "difficult-words")]
#[command(about = "Find rare, unfamiliar words in corpus frequency exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge frequency exports and write the ranked difficult-word list.
    Extract(ExtractArgs),
    /// Look up definitions for an extracted list, resuming where a previous run stopped.
    Define(DefineArgs),
}

#[derive(Args)]
struct ExtractArgs {
    /// Frequency exports to merge. Discovered in --dir when omitted.
    inputs: Vec<PathBuf>,
    #[arg(long, env = "CORPUS_DIR", default_value = ".")]
    dir: PathBuf,
    /// Canonical export name; `<stem>_*.<ext>` companions are merged with it.
    #[arg(long, env = "CORPUS_CANONICAL", default_value = pipeline::DEFAULT_CANONICAL)]
    canonical: String,
    #[arg(long, env = "LEXICON_PATH", default_value = pipeline::DEFAULT_LEXICON)]
    lexicon: PathBuf,
    #[arg(long, env = "DIFFICULT_WORDS_PATH", default_value = pipeline::DEFAULT_OUTPUT)]
    output: PathBuf,
    #[arg(long, env = "FREQ_CEILING", default_value_t = DEFAULT_FREQ_CEILING)]
    ceiling: f64,
    #[arg(long, env = "MIN_WORD_LEN", default_value_t = DEFAULT_MIN_WORD_LEN)]
    min_len: usize,
    /// Extra stop words, one per line.
    #[arg(long, env = "STOPLIST_PATH")]
    stoplist: Option<PathBuf>,
    /// Extra irregular forms, `surface lemma` per line.
    #[arg(long, env = "IRREGULAR_PATH")]
    exceptions: Option<PathBuf>,
}

#[derive(Args)]
struct DefineArgs {
    #[arg(long, default_value = define::DEFAULT_INPUT)]
    input: PathBuf,
    #[arg(long, default_value = define::DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Stop after this many new words.
    #[arg(long)]
    limit: Option<usize>,
    /// Seconds between requests.
    #[arg(long, env = "DEFINE_DELAY_SECS", default_value_t = 0.3)]
    delay: f64,
    /// Attempts per word before recording it blank.
    #[arg(long, env = "DEFINE_RETRIES", default_value_t = 3)]
    retries: u32,
    #[arg(long, env = "DICTIONARY_API_URL", default_value = define::DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => {
            let options = ExtractOptions {
                inputs: args.inputs,
                corpus_dir: args.dir,
                canonical: args.canonical,
                lexicon: args.lexicon,
                output: args.output,
                filter: FilterConfig {
                    ceiling: args.ceiling,
                    min_len: args.min_len,
                },
                stoplist: args.stoplist,
                exceptions: args.exceptions,
            };
            let summary = run_extract(&options)?;
            println!(
                "{} difficult words saved to {} ({} unique words from {} files)",
                summary.report.kept,
                options.output.display(),
                summary.unique_words,
                summary.inputs.len()
            );
        }
        Commands::Define(args) => {
            let delay = Duration::try_from_secs_f64(args.delay)
                .context("--delay must be a non-negative number of seconds")?;
            info!("looking up definitions via {}", args.api_url);
            let api = DictionaryApi::new(&args.api_url)?;
            let options = DefineOptions {
                input: args.input,
                output: args.output,
                limit: args.limit,
                delay,
                max_retries: args.retries,
            };
            let fetched = fetch_definitions(&api, &options).await?;
            println!(
                "Wrote {} definitions to {}",
                fetched,
                options.output.display()
            );
        }
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
