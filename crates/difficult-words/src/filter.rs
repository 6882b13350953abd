//! Exclusion pipeline from aggregate frequencies to ranked difficult words.
//!
//! Every word runs through the same ordered checks and stops at the first one
//! that rejects it:
//!
//! 1. frequency above the ceiling (common words and names),
//! 2. re-normalized form shorter than the minimum length,
//! 3. stoplist membership,
//! 4. reference-lexicon membership of the surface form,
//! 5. reference-lexicon membership of the heuristic lemma.
//!
//! The checks are independent predicates, so the order only decides which
//! [`Exclusion`] a word is counted under. Survivors are ranked rarest first;
//! equal frequencies keep their first-seen order.

use tracing::info;
use vocab_corpus::Lexicon;
use vocab_morphy::Lemmatizer;
use vocab_types::{DifficultWord, FrequencyMap, NormalizedWord};

use crate::stoplist::StopWords;

pub const DEFAULT_FREQ_CEILING: f64 = 1000.0;
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterConfig {
    /// Words with a strictly greater aggregate frequency are dropped.
    pub ceiling: f64,
    /// Words with fewer characters are dropped.
    pub min_len: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_FREQ_CEILING,
            min_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

/// Why a word did not make the list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Exclusion {
    AboveCeiling,
    TooShort,
    Stopword,
    KnownSurface,
    KnownLemma,
}

/// Per-reason tallies for one filter run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterReport {
    pub kept: usize,
    pub above_ceiling: usize,
    pub too_short: usize,
    pub stopword: usize,
    pub known_surface: usize,
    pub known_lemma: usize,
}

impl FilterReport {
    fn record(&mut self, exclusion: Exclusion) {
        let slot = match exclusion {
            Exclusion::AboveCeiling => &mut self.above_ceiling,
            Exclusion::TooShort => &mut self.too_short,
            Exclusion::Stopword => &mut self.stopword,
            Exclusion::KnownSurface => &mut self.known_surface,
            Exclusion::KnownLemma => &mut self.known_lemma,
        };
        *slot += 1;
    }

    pub fn excluded(&self) -> usize {
        self.above_ceiling + self.too_short + self.stopword + self.known_surface + self.known_lemma
    }
}

#[derive(Clone, Debug)]
pub struct FilterOutcome {
    /// Ranked rarest first.
    pub words: Vec<DifficultWord>,
    pub report: FilterReport,
}

/// The exclusion checks bound to one run's vocabulary and settings.
pub struct DifficultyFilter<'a> {
    config: FilterConfig,
    stoplist: &'a StopWords,
    lexicon: &'a Lexicon,
    lemmatizer: &'a Lemmatizer,
}

impl<'a> DifficultyFilter<'a> {
    pub fn new(
        config: FilterConfig,
        stoplist: &'a StopWords,
        lexicon: &'a Lexicon,
        lemmatizer: &'a Lemmatizer,
    ) -> Self {
        Self {
            config,
            stoplist,
            lexicon,
            lemmatizer,
        }
    }

    /// Run the checks for one word, returning its canonical form if it survives.
    pub fn check(&self, word: &str, frequency: f64) -> Result<NormalizedWord, Exclusion> {
        if frequency > self.config.ceiling {
            return Err(Exclusion::AboveCeiling);
        }
        let word = match NormalizedWord::new(word) {
            Some(word) if word.len() >= self.config.min_len => word,
            _ => return Err(Exclusion::TooShort),
        };
        if self.stoplist.contains(word.as_str()) {
            return Err(Exclusion::Stopword);
        }
        if self.lexicon.contains(word.as_str()) {
            return Err(Exclusion::KnownSurface);
        }
        let lemma = self
            .lemmatizer
            .lemmatize(word.as_str(), |cand| self.lexicon.contains(cand));
        if self.lexicon.contains(&lemma.lemma) {
            return Err(Exclusion::KnownLemma);
        }
        Ok(word)
    }

    pub fn run(&self, freqs: &FrequencyMap) -> FilterOutcome {
        let mut report = FilterReport::default();
        let mut words = Vec::new();
        for (word, frequency) in freqs.iter() {
            match self.check(word.as_str(), frequency) {
                Ok(word) => words.push(DifficultWord { word, frequency }),
                Err(exclusion) => report.record(exclusion),
            }
        }
        // Stable: ties keep first-seen order.
        words.sort_by(|a, b| a.frequency.total_cmp(&b.frequency));
        report.kept = words.len();

        info!(
            "kept {} of {} words (ceiling {}, short {}, stoplist {}, lexicon {}, lemma {})",
            report.kept,
            freqs.len(),
            report.above_ceiling,
            report.too_short,
            report.stopword,
            report.known_surface,
            report.known_lemma
        );
        FilterOutcome { words, report }
    }
}

/// Filter `freqs` in one call.
pub fn filter(
    freqs: &FrequencyMap,
    lexicon: &Lexicon,
    stoplist: &StopWords,
    lemmatizer: &Lemmatizer,
    config: FilterConfig,
) -> FilterOutcome {
    DifficultyFilter::new(config, stoplist, lexicon, lemmatizer).run(freqs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freqs(pairs: &[(&str, f64)]) -> FrequencyMap {
        pairs
            .iter()
            .filter_map(|(raw, freq)| NormalizedWord::new(raw).map(|w| (w, *freq)))
            .collect()
    }

    fn run(pairs: &[(&str, f64)], lexicon: &[&str], config: FilterConfig) -> FilterOutcome {
        let lexicon: Lexicon = lexicon.iter().collect();
        filter(
            &freqs(pairs),
            &lexicon,
            &StopWords::default(),
            &Lemmatizer::new(),
            config,
        )
    }

    fn kept(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.words.iter().map(|w| w.word.as_str()).collect()
    }

    #[test]
    fn ceiling_is_inclusive() {
        let outcome = run(
            &[("kraken", 1000.0), ("leviathan", 1000.01)],
            &[],
            FilterConfig::default(),
        );
        assert_eq!(kept(&outcome), vec!["kraken"]);
        assert_eq!(outcome.report.above_ceiling, 1);
    }

    #[test]
    fn short_words_never_survive() {
        let outcome = run(
            &[("ox", 1.0), ("yew", 1.0), ("qi", 2.0)],
            &[],
            FilterConfig::default(),
        );
        assert_eq!(kept(&outcome), vec!["yew"]);
        assert_eq!(outcome.report.too_short, 2);
    }

    #[test]
    fn minimum_length_is_configurable() {
        let config = FilterConfig {
            min_len: 5,
            ..FilterConfig::default()
        };
        let outcome = run(&[("yew", 1.0), ("kelpie", 1.0)], &[], config);
        assert_eq!(kept(&outcome), vec!["kelpie"]);
    }

    #[test]
    fn stoplist_and_lexicon_exclusions() {
        let outcome = run(
            &[("thousand", 3.0), ("anchor", 2.0), ("gunwale", 1.0)],
            &["anchor"],
            FilterConfig::default(),
        );
        assert_eq!(kept(&outcome), vec!["gunwale"]);
        assert_eq!(outcome.report.stopword, 1);
        assert_eq!(outcome.report.known_surface, 1);
    }

    #[test]
    fn lemma_exclusions() {
        let outcome = run(
            &[("running", 2.0), ("foxes", 3.0), ("went", 4.0), ("fathoms", 5.0)],
            &["run", "fox", "go"],
            FilterConfig::default(),
        );
        assert_eq!(kept(&outcome), vec!["fathoms"]);
        assert_eq!(outcome.report.known_lemma, 3);
    }

    #[test]
    fn ranks_rarest_first_with_stable_ties() {
        let outcome = run(
            &[("tack", 3.0), ("yawl", 1.0), ("sloop", 2.0), ("ketch", 1.0)],
            &[],
            FilterConfig::default(),
        );
        assert_eq!(kept(&outcome), vec!["yawl", "ketch", "sloop", "tack"]);
        let freqs: Vec<f64> = outcome.words.iter().map(|w| w.frequency).collect();
        assert_eq!(freqs, vec![1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn report_accounts_for_every_word() {
        let pairs = [
            ("the", 50000.0),
            ("whale", 5.0),
            ("cat", 20.0),
            ("of", 2.0),
            ("and", 3.0),
        ];
        let outcome = run(&pairs, &["the", "cat"], FilterConfig::default());
        assert_eq!(outcome.report.kept + outcome.report.excluded(), pairs.len());
        assert_eq!(kept(&outcome), vec!["whale"]);
    }

    #[test]
    fn check_reports_first_failing_stage() {
        let lexicon: Lexicon = ["the"].iter().collect();
        let stop = StopWords::default();
        let morph = Lemmatizer::new();
        let filter = DifficultyFilter::new(FilterConfig::default(), &stop, &lexicon, &morph);
        // Frequent and stoplisted and known: the ceiling check comes first.
        assert_eq!(filter.check("the", 5000.0), Err(Exclusion::AboveCeiling));
        assert_eq!(filter.check("the", 1.0), Err(Exclusion::Stopword));
        assert_eq!(filter.check("--", 1.0), Err(Exclusion::TooShort));
        assert_eq!(
            filter.check("Bowsprit", 1.0).map(NormalizedWord::into_string),
            Ok("bowsprit".to_string())
        );
    }
}
