//! Shared types for the difficult-words pipeline.
//!
//! Every stage of the pipeline compares words through the same canonical key,
//! a [`NormalizedWord`]: lowercase ASCII letters, internal single hyphens, and
//! the occasional space where punctuation used to separate two words. The
//! [`normalize`] function produces that key from any surface token and is
//! idempotent, so re-normalizing a key is always harmless.
//!
//! [`FrequencyMap`] accumulates per-word counts across corpus exports and
//! remembers first-seen order, which gives the final ranking a reproducible
//! tie order. [`DifficultWord`] is a single surviving entry.
//!
//! ```rust
//! use vocab_types::{FrequencyMap, NormalizedWord, normalize};
//!
//! assert_eq!(normalize("Captain's"), "captain");
//! let mut map = FrequencyMap::new();
//! map.add(NormalizedWord::new("Tempest").unwrap(), 5.0);
//! map.add(NormalizedWord::new("TEMPEST").unwrap(), 7.0);
//! assert_eq!(map.get("tempest"), Some(12.0));
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

const POSSESSIVE_SUFFIXES: [&str; 2] = ["'s", "\u{2019}s"];

/// Canonicalize a surface token into a comparable lexical key.
///
/// Lowercases, strips one trailing `'s`/`’s`, turns every character that is
/// not `a-z` or `-` into a space, folds hyphens together with any spaces
/// around them into a single hyphen, and trims hyphens and spaces from both
/// ends. Returns an empty string when nothing is left.
///
/// A bare trailing apostrophe (`dogs'`) is not a possessive here; it simply
/// becomes a separator and is trimmed away, leaving `dogs`.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = POSSESSIVE_SUFFIXES
        .iter()
        .find_map(|suffix| lowered.strip_suffix(suffix))
        .unwrap_or(&lowered);

    let mut out = String::with_capacity(stripped.len());
    // Pending run of separators: (spaces seen, any hyphen seen).
    let mut pending_spaces = 0usize;
    let mut pending_hyphen = false;
    for c in stripped.chars() {
        match c {
            'a'..='z' => {
                flush_separators(&mut out, pending_spaces, pending_hyphen);
                pending_spaces = 0;
                pending_hyphen = false;
                out.push(c);
            }
            '-' => pending_hyphen = true,
            _ => pending_spaces += 1,
        }
    }
    // Trailing separators are trimmed, so the final run is dropped.
    out
}

fn flush_separators(out: &mut String, spaces: usize, hyphen: bool) {
    if out.is_empty() {
        return;
    }
    if hyphen {
        out.push('-');
    } else {
        out.extend(std::iter::repeat_n(' ', spaces));
    }
}

/// A non-empty word in canonical form, produced only by [`normalize`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NormalizedWord(String);

impl NormalizedWord {
    /// Normalize `raw`; `None` when the token has no retainable letters.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = normalize(raw);
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Always false for a constructed word.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedWord {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedWord {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedWord {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Aggregate frequency per normalized word across all corpus sources.
///
/// Repeated keys are summed. Each word keeps its individual contributions and
/// totals them in ascending order, so the same set of files yields bit-for-bit
/// identical totals whatever order they were merged in. Iteration yields words
/// in first-seen order; equality ignores order.
#[derive(Clone, Debug, Default)]
pub struct FrequencyMap {
    entries: Vec<(NormalizedWord, Vec<f64>)>,
    slots: HashMap<NormalizedWord, usize>,
}

impl FrequencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more `frequency` for `word`.
    pub fn add(&mut self, word: NormalizedWord, frequency: f64) {
        match self.slots.get(&word) {
            Some(&slot) => self.entries[slot].1.push(frequency),
            None => {
                self.slots.insert(word.clone(), self.entries.len());
                self.entries.push((word, vec![frequency]));
            }
        }
    }

    /// Total frequency of `word`, if it was seen.
    pub fn get(&self, word: &str) -> Option<f64> {
        self.slots
            .get(word)
            .map(|&slot| ordered_sum(&self.entries[slot].1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(word, total)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedWord, f64)> + '_ {
        self.entries
            .iter()
            .map(|(word, parts)| (word, ordered_sum(parts)))
    }
}

fn ordered_sum(parts: &[f64]) -> f64 {
    if let [single] = parts {
        return *single;
    }
    let mut sorted = parts.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().sum()
}

impl PartialEq for FrequencyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(word, freq)| other.get(word.as_str()) == Some(freq))
    }
}

impl Extend<(NormalizedWord, f64)> for FrequencyMap {
    fn extend<I: IntoIterator<Item = (NormalizedWord, f64)>>(&mut self, iter: I) {
        for (word, freq) in iter {
            self.add(word, freq);
        }
    }
}

impl FromIterator<(NormalizedWord, f64)> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = (NormalizedWord, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// A word that survived every exclusion, with its aggregate frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultWord {
    pub word: NormalizedWord,
    pub frequency: f64,
}
