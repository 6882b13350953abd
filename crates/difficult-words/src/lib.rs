pub mod define;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod stoplist;

pub use define::{DefineOptions, DefinitionSource, DictionaryApi, fetch_definitions};
pub use filter::{
    DEFAULT_FREQ_CEILING, DEFAULT_MIN_WORD_LEN, DifficultyFilter, Exclusion, FilterConfig,
    FilterOutcome, FilterReport, filter,
};
pub use output::write_difficult_words;
pub use pipeline::{ExtractOptions, ExtractSummary, run_extract};
pub use stoplist::StopWords;
