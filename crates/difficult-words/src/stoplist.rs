//! Function words and numerals excluded regardless of frequency.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use vocab_types::normalize;

/// Function words, pronouns, and numerals a reference vocabulary may not list.
pub static DEFAULT_STOP_WORDS: &[&str] = &[
    // Articles, conjunctions, prepositions
    "a", "an", "the", "and", "or", "but", "if", "so", "to", "of", "in", "on", "at", "by", "for",
    "from", "as",
    // Pronouns
    "i", "me", "my", "you", "your", "we", "our", "he", "him", "his", "she", "her", "it", "its",
    "they", "them", "their",
    // Auxiliaries
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "did", "done", "have", "has",
    "had",
    // Numerals
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "hundred",
    "thousand",
    // Export artifacts
    "de", "s",
];

#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::from_slice(DEFAULT_STOP_WORDS)
    }
}

impl StopWords {
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn from_slice(words: &[&str]) -> Self {
        let mut stop = Self::empty();
        for word in words {
            stop.add(word);
        }
        stop
    }

    /// Merge words from a file (one per line, `#` starts a comment line).
    /// Returns how many lines contributed a word.
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> std::io::Result<usize> {
        let content = fs::read_to_string(path)?;
        let mut added = 0usize;
        for line in content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
        {
            if self.add(line) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add a word in normalized form; false if it was already present or
    /// normalizes to nothing.
    pub fn add(&mut self, word: &str) -> bool {
        let normalized = normalize(word);
        !normalized.is_empty() && self.words.insert(normalized)
    }

    /// Expects an already-normalized word.
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_list_covers_function_words_and_numerals() {
        let stop = StopWords::default();
        assert!(stop.contains("the"));
        assert!(stop.contains("thousand"));
        assert!(stop.contains("their"));
        assert!(stop.contains("de"));
        assert!(!stop.contains("whale"));
        assert_eq!(stop.len(), DEFAULT_STOP_WORDS.len());
    }

    #[test]
    fn extends_from_file_with_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# character names").unwrap();
        writeln!(file, "Ahab").unwrap();
        writeln!(file, "  ishmael  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "the").unwrap();

        let mut stop = StopWords::default();
        let added = stop.extend_from_file(file.path()).unwrap();
        assert_eq!(added, 2);
        assert!(stop.contains("ahab"));
        assert!(stop.contains("ishmael"));
    }

    #[test]
    fn ignores_words_without_letters() {
        let mut stop = StopWords::empty();
        assert!(!stop.add("42"));
        assert!(stop.is_empty());
    }
}
