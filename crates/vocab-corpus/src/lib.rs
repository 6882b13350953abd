//! Read corpus frequency exports and reference vocabulary lists from disk.
//!
//! Frequency exports come from different concordancers and rarely agree on a
//! layout. [`parse_frequency_file`] resolves a [`ColumnPlan`] from the header
//! once per file and then degrades row by row: anything it cannot make sense
//! of is skipped, never reported as an error. Only unreadable files fail.
//!
//! [`aggregate`] folds any number of exports into a single
//! [`FrequencyMap`](vocab_types::FrequencyMap), and [`discover_inputs`] finds
//! a canonical export plus its numbered companions in a directory.
//! [`Lexicon::load`] reads the reference vocabulary the filter compares against.
//!
//! ```no_run
//! use vocab_corpus::{Lexicon, aggregate, discover_inputs};
//!
//! # fn main() -> Result<(), vocab_corpus::CorpusError> {
//! let inputs = discover_inputs(".", "Word_results.txt")?;
//! let freqs = aggregate(&inputs)?;
//! let lexicon = Lexicon::load("NGSL_1.2_stats.csv")?;
//! println!("{} words, {} known", freqs.len(), lexicon.len());
//! # Ok(()) }
//! ```

pub mod aggregate;
pub mod freqlist;
pub mod lexicon;

use std::path::PathBuf;

use thiserror::Error;

pub use aggregate::{aggregate, dedup_paths, discover_inputs};
pub use freqlist::{ColumnPlan, Delimiter, ParsedFile, parse_frequency_file, parse_frequency_reader};
pub use lexicon::Lexicon;

/// Structural failures. Data-quality problems never produce one of these.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}
