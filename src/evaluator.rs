//! Word quality scoring, used to keep awkward entries out of the index.
//!
//! A score is the sum of every metric's contribution. A metric either flags the word
//! (a flagged word takes [`DEFAULT_PENALTY`]) or reports a literal score.

use crate::dictionary::DictionaryWord;
use std::fmt;

/// Contribution of a raised flag.
pub const DEFAULT_PENALTY: f64 = -50.0;

/// Threshold used by `--strict`: any single flag excludes the word.
pub const STRICT_THRESHOLD: f64 = -10.0;

/// What a metric reports about one rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// `true` costs [`DEFAULT_PENALTY`], `false` costs nothing.
    Flag(bool),
    /// Added to the score as-is.
    Score(f64),
}

impl Measurement {
    #[must_use]
    pub fn contribution(self) -> f64 {
        match self {
            Measurement::Flag(true) => DEFAULT_PENALTY,
            Measurement::Flag(false) => 0.0,
            Measurement::Score(score) => score,
        }
    }
}

/// A metric inspects a word's original rendering.
pub type Metric = Box<dyn Fn(&str) -> Measurement + Send + Sync>;

/// Rendering contains an apostrophe (contractions, possessives).
#[must_use]
pub fn has_apostrophe(rendering: &str) -> Measurement {
    Measurement::Flag(rendering.contains(['\'', '\u{2019}']))
}

/// Rendering's first character is unchanged by upper-casing (proper nouns, acronyms).
#[must_use]
pub fn is_capitalized(rendering: &str) -> Measurement {
    Measurement::Flag(
        rendering
            .chars()
            .next()
            .is_some_and(|first| first.to_uppercase().eq(std::iter::once(first))),
    )
}

pub struct Evaluator {
    metrics: Vec<Metric>,
}

impl Evaluator {
    #[must_use]
    pub fn new(metrics: Vec<Metric>) -> Self {
        Evaluator { metrics }
    }

    /// Sum of every metric's contribution for `word`.
    #[must_use]
    pub fn evaluate(&self, word: &DictionaryWord) -> f64 {
        self.evaluate_rendering(word.rendering())
    }

    #[must_use]
    pub fn evaluate_rendering(&self, rendering: &str) -> f64 {
        self.metrics.iter().map(|metric| metric(rendering).contribution()).sum()
    }

    /// Whether `word` scores at least `threshold`.
    #[must_use]
    pub fn meets(&self, word: &DictionaryWord, threshold: f64) -> bool {
        self.evaluate(word) >= threshold
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        let metrics: Vec<Metric> = vec![Box::new(has_apostrophe), Box::new(is_capitalized)];
        Evaluator::new(metrics)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").field("metrics", &self.metrics.len()).finish()
    }
}
