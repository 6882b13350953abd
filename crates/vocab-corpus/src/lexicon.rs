use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::CorpusError;

/// Reference vocabulary: lowercase word forms a fluent reader already knows.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    words: HashSet<String>,
}

impl Lexicon {
    /// Load a tabular vocabulary list (header row, one word per row in the
    /// first column). Cells are trimmed and lowercased; blank cells are skipped.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| CorpusError::io(path, err))?;
        let lexicon = Self::from_reader(file).map_err(|source| CorpusError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        info!("loaded {} lexicon words from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut words = HashSet::new();
        for record in rdr.records() {
            let record = record?;
            let Some(cell) = record.get(0) else {
                continue;
            };
            let lemma = cell.trim().to_lowercase();
            if !lemma.is_empty() {
                words.insert(lemma);
            }
        }
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}
