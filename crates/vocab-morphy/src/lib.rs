//! Heuristic lemma guessing for vocabulary filtering.
//!
//! A much smaller cousin of WordNet's morphy: instead of a full exception
//! database and POS-specific rules, it carries a fixed table of irregular
//! forms and one ordered list of English suffix rules. Candidates are checked
//! against a caller-provided predicate, usually membership in a reference
//! vocabulary, so the crate stays ignorant of how that vocabulary is stored.
//!
//! # How it works
//! 1. An irregular form (`went`, `him`, `thought`) maps straight to its lemma.
//! 2. Otherwise the surface form and every applicable [`SUFFIX_RULES`]
//!    candidate are generated, in table order.
//! 3. The first candidate the predicate accepts wins; with no match the
//!    surface form is returned unchanged.
//!
//! Missed lemmas are acceptable. The goal is fewer known words slipping
//! through a difficulty filter, not a complete morphological analysis.
//!
//! # Example
//! ```
//! use std::collections::HashSet;
//! use vocab_morphy::{CandidateSource, Lemmatizer};
//!
//! let known: HashSet<&str> = ["run", "go", "fox"].into_iter().collect();
//! let morph = Lemmatizer::new();
//!
//! let running = morph.lemmatize("running", |w| known.contains(w));
//! assert_eq!(running.lemma, "run");
//!
//! let went = morph.lemmatize("went", |w| known.contains(w));
//! assert_eq!(went.lemma, "go");
//! assert_eq!(went.source, CandidateSource::Irregular);
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

/// Where a candidate lemma originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Irregular,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
    /// A rule stem with its doubled final consonant collapsed (`runn` -> `run`).
    Undoubled { suffix: &'static str },
}

/// A lemma guess paired with its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaCandidate<'a> {
    pub lemma: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Replace `suffix` with `replacement` on words longer than `longer_than`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SuffixRule {
    pub suffix: &'static str,
    pub replacement: &'static str,
    pub longer_than: usize,
    /// Also try the stem with a doubled final consonant collapsed.
    pub undouble: bool,
}

/// Suffix rules in candidate order.
pub const SUFFIX_RULES: &[SuffixRule] = &[
    SuffixRule {
        suffix: "ies",
        replacement: "y",
        longer_than: 0,
        undouble: false,
    },
    SuffixRule {
        suffix: "es",
        replacement: "",
        longer_than: 0,
        undouble: false,
    },
    SuffixRule {
        suffix: "s",
        replacement: "",
        longer_than: 3,
        undouble: false,
    },
    SuffixRule {
        suffix: "ed",
        replacement: "",
        longer_than: 3,
        undouble: true,
    },
    SuffixRule {
        suffix: "ed",
        replacement: "e",
        longer_than: 3,
        undouble: false,
    },
    SuffixRule {
        suffix: "ing",
        replacement: "",
        longer_than: 4,
        undouble: true,
    },
    SuffixRule {
        suffix: "ing",
        replacement: "e",
        longer_than: 4,
        undouble: false,
    },
];

/// Irregular verb forms and pronoun case forms, mapped to their lemma.
pub const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("am", "be"),
    ("is", "be"),
    ("are", "be"),
    ("has", "have"),
    ("had", "have"),
    ("did", "do"),
    ("done", "do"),
    ("does", "do"),
    ("said", "say"),
    ("made", "make"),
    ("went", "go"),
    ("gone", "go"),
    ("goes", "go"),
    ("got", "get"),
    ("gotten", "get"),
    ("came", "come"),
    ("come", "come"),
    ("told", "tell"),
    ("saw", "see"),
    ("seen", "see"),
    ("thought", "think"),
    ("thinking", "think"),
    ("knew", "know"),
    ("known", "know"),
    ("took", "take"),
    ("taken", "take"),
    ("gave", "give"),
    ("given", "give"),
    ("found", "find"),
    ("left", "leave"),
    ("felt", "feel"),
    ("kept", "keep"),
    ("held", "hold"),
    ("bought", "buy"),
    ("brought", "bring"),
    ("became", "become"),
    ("began", "begin"),
    ("begun", "begin"),
    ("ran", "run"),
    ("wrote", "write"),
    ("written", "write"),
    ("spoke", "speak"),
    ("spoken", "speak"),
    ("sat", "sit"),
    ("stood", "stand"),
    ("led", "lead"),
    ("lost", "lose"),
    ("paid", "pay"),
    ("met", "meet"),
    ("men", "man"),
    ("eyes", "eye"),
    ("me", "i"),
    ("my", "i"),
    ("mine", "i"),
    ("us", "we"),
    ("our", "we"),
    ("ours", "we"),
    ("him", "he"),
    ("his", "he"),
    ("her", "she"),
    ("hers", "she"),
    ("them", "they"),
    ("their", "they"),
    ("theirs", "they"),
    ("you", "you"),
    ("your", "you"),
    ("yours", "you"),
];

/// Irregular-form table plus the fixed suffix rules.
#[derive(Clone, Debug)]
pub struct Lemmatizer {
    irregular: HashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    /// Lemmatizer with the built-in [`IRREGULAR_FORMS`].
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_FORMS
                .iter()
                .map(|(surface, lemma)| (surface.to_string(), lemma.to_string()))
                .collect(),
        }
    }

    /// Merge extra irregular forms from a morphy-style exception file.
    ///
    /// Each line is `surface lemma [lemma ...]`; only the first lemma is used.
    /// Entries override the built-in table.
    pub fn with_exceptions_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file =
            File::open(path).with_context(|| format!("open exception file {}", path.display()))?;
        let reader = BufReader::new(file);
        for (lineno, line) in reader.lines().enumerate() {
            let line =
                line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            if let (Some(surface), Some(lemma)) = (parts.next(), parts.next()) {
                self.irregular
                    .insert(surface.to_lowercase(), lemma.to_lowercase());
            }
        }
        Ok(self)
    }

    /// Irregular lemma for `word`, if the table has one.
    pub fn irregular(&self, word: &str) -> Option<&str> {
        self.irregular.get(word).map(String::as_str)
    }

    pub fn irregular_count(&self) -> usize {
        self.irregular.len()
    }

    /// Best lemma guess for a normalized word.
    ///
    /// Irregular forms win outright, whether or not `is_known` accepts the
    /// lemma. Otherwise the first candidate `is_known` accepts is returned,
    /// falling back to the surface form.
    pub fn lemmatize<'a, F>(&'a self, word: &'a str, is_known: F) -> LemmaCandidate<'a>
    where
        F: Fn(&str) -> bool,
    {
        if let Some(lemma) = self.irregular.get(word) {
            return LemmaCandidate {
                lemma: Cow::Borrowed(lemma.as_str()),
                source: CandidateSource::Irregular,
            };
        }

        candidates(word)
            .into_iter()
            .find(|cand| is_known(cand.lemma.as_ref()))
            .unwrap_or(LemmaCandidate {
                lemma: Cow::Borrowed(word),
                source: CandidateSource::Surface,
            })
    }
}

/// Surface form followed by every suffix-rule candidate, in rule order.
pub fn candidates(word: &str) -> Vec<LemmaCandidate<'_>> {
    let mut seen: HashSet<Cow<'_, str>> = HashSet::new();
    let mut out = Vec::new();
    push_unique(
        &mut out,
        &mut seen,
        LemmaCandidate {
            lemma: Cow::Borrowed(word),
            source: CandidateSource::Surface,
        },
    );

    let len = word.chars().count();
    for rule in SUFFIX_RULES {
        if len <= rule.longer_than {
            continue;
        }
        let Some(stem) = word.strip_suffix(rule.suffix) else {
            continue;
        };
        let lemma = if rule.replacement.is_empty() {
            Cow::Borrowed(stem)
        } else {
            Cow::Owned(format!("{stem}{}", rule.replacement))
        };
        push_unique(
            &mut out,
            &mut seen,
            LemmaCandidate {
                lemma,
                source: CandidateSource::Rule {
                    suffix: rule.suffix,
                    replacement: rule.replacement,
                },
            },
        );
        if rule.undouble
            && let Some(single) = undouble(stem)
        {
            push_unique(
                &mut out,
                &mut seen,
                LemmaCandidate {
                    lemma: Cow::Borrowed(single),
                    source: CandidateSource::Undoubled {
                        suffix: rule.suffix,
                    },
                },
            );
        }
    }
    out
}

/// `runn` -> `run`, `stopp` -> `stop`; vowels are left alone (`see`).
fn undouble(stem: &str) -> Option<&str> {
    let mut chars = stem.chars();
    let last = chars.next_back()?;
    let prev = chars.next_back()?;
    if last == prev && last.is_ascii_alphabetic() && !"aeiou".contains(last) {
        Some(&stem[..stem.len() - last.len_utf8()])
    } else {
        None
    }
}

fn push_unique<'a>(
    out: &mut Vec<LemmaCandidate<'a>>,
    seen: &mut HashSet<Cow<'a, str>>,
    candidate: LemmaCandidate<'a>,
) {
    if seen.insert(candidate.lemma.clone()) {
        out.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lemmas(word: &str) -> Vec<String> {
        candidates(word)
            .into_iter()
            .map(|c| c.lemma.into_owned())
            .collect()
    }

    fn known(words: &[&str]) -> impl Fn(&str) -> bool {
        let set: HashSet<String> = words.iter().map(|w| w.to_string()).collect();
        move |w| set.contains(w)
    }

    #[test]
    fn every_rule_generates_its_candidate() {
        assert_eq!(lemmas("studies"), vec!["studies", "study", "studi", "studie"]);
        assert_eq!(lemmas("foxes"), vec!["foxes", "fox", "foxe"]);
        assert_eq!(lemmas("cats"), vec!["cats", "cat"]);
        assert_eq!(lemmas("baked"), vec!["baked", "bak", "bake"]);
        assert_eq!(lemmas("stopped"), vec!["stopped", "stopp", "stop", "stoppe"]);
        assert_eq!(lemmas("running"), vec!["running", "runn", "run", "runne"]);
        assert_eq!(lemmas("making"), vec!["making", "mak", "make"]);
    }

    #[test]
    fn length_guards_prevent_over_stripping() {
        assert_eq!(lemmas("bus"), vec!["bus"]);
        assert_eq!(lemmas("red"), vec!["red"]);
        assert_eq!(lemmas("sing"), vec!["sing"]);
        assert_eq!(lemmas("bed"), vec!["bed"]);
        // `-es` carries no length guard.
        assert_eq!(lemmas("yes"), vec!["yes", "y"]);
    }

    #[test]
    fn rule_table_order_is_fixed() {
        let suffixes: Vec<(&str, &str)> = SUFFIX_RULES
            .iter()
            .map(|r| (r.suffix, r.replacement))
            .collect();
        assert_eq!(
            suffixes,
            vec![
                ("ies", "y"),
                ("es", ""),
                ("s", ""),
                ("ed", ""),
                ("ed", "e"),
                ("ing", ""),
                ("ing", "e"),
            ]
        );
    }

    #[test]
    fn undoubling_skips_vowels() {
        assert_eq!(undouble("runn"), Some("run"));
        assert_eq!(undouble("see"), None);
        assert_eq!(undouble("a"), None);
        assert_eq!(lemmas("seeing"), vec!["seeing", "see", "seee"]);
    }

    #[test]
    fn irregulars_win_before_rules() {
        let morph = Lemmatizer::new();
        let went = morph.lemmatize("went", known(&["go"]));
        assert_eq!(went.lemma, "go");
        assert_eq!(went.source, CandidateSource::Irregular);

        // Irregular lemma is returned even when the surface form is known.
        let thinking = morph.lemmatize("thinking", known(&["thinking"]));
        assert_eq!(thinking.lemma, "think");

        let him = morph.lemmatize("him", known(&[]));
        assert_eq!(him.lemma, "he");
    }

    #[test]
    fn first_known_candidate_wins() {
        let morph = Lemmatizer::new();
        let running = morph.lemmatize("running", known(&["run", "runne"]));
        assert_eq!(running.lemma, "run");
        assert_eq!(
            running.source,
            CandidateSource::Undoubled { suffix: "ing" }
        );

        let foxes = morph.lemmatize("foxes", known(&["fox"]));
        assert_eq!(foxes.lemma, "fox");
        assert_eq!(
            foxes.source,
            CandidateSource::Rule {
                suffix: "es",
                replacement: ""
            }
        );

        let baked = morph.lemmatize("baked", known(&["bake"]));
        assert_eq!(baked.lemma, "bake");
    }

    #[test]
    fn surface_is_returned_when_nothing_matches() {
        let morph = Lemmatizer::new();
        let cand = morph.lemmatize("scrimshaws", known(&["whale"]));
        assert_eq!(cand.lemma, "scrimshaws");
        assert_eq!(cand.source, CandidateSource::Surface);

        let empty = morph.lemmatize("", known(&[]));
        assert_eq!(empty.lemma, "");
    }

    #[test]
    fn surface_match_precedes_rules() {
        let morph = Lemmatizer::new();
        let cand = morph.lemmatize("news", known(&["news", "new"]));
        assert_eq!(cand.lemma, "news");
        assert_eq!(cand.source, CandidateSource::Surface);
    }

    #[test]
    fn loads_extra_exceptions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# sea shanty verbs").unwrap();
        writeln!(file, "hove heave").unwrap();
        writeln!(file, "Slew slay").unwrap();
        writeln!(file, "lonely").unwrap();

        let morph = Lemmatizer::new()
            .with_exceptions_file(file.path())
            .expect("load exceptions");
        assert_eq!(morph.irregular("hove"), Some("heave"));
        assert_eq!(morph.irregular("slew"), Some("slay"));
        assert_eq!(morph.irregular("lonely"), None);
        assert_eq!(morph.irregular("went"), Some("go"));
        assert_eq!(morph.irregular_count(), IRREGULAR_FORMS.len() + 2);
    }

    #[test]
    fn missing_exception_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Lemmatizer::new()
            .with_exceptions_file(dir.path().join("verbs.exc"))
            .unwrap_err();
        assert!(err.to_string().contains("verbs.exc"));
    }
}
