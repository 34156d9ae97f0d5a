//! The resolution driver: letter specification in, deduplicated anagrams out.
//!
//! # Error Handling
//!
//! The resolver uses [`ResolveError`] with three variants:
//!
//! - R001: `ParseFailure` (Specification could not be parsed (wraps [`ParseError`]))
//! - R002: `UnsupportedWordCount` (`max_words` outside 1..=3)
//! - R003: `Dictionary` (Word list could not be read)
//!
//! A specification with no letters at all is not an error: it resolves to nothing with
//! [`ResolveStatus::EmptyQuery`]. Finding no anagrams is not an error either.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```
//! use anagrammary::dictionary::Dictionary;
//! use anagrammary::resolver::{self, ResolveOptions};
//!
//! let dictionary = Dictionary::from_words(["foo", "bar", "reason", "are", "son"]);
//! let options = ResolveOptions { max_words: 2, ..ResolveOptions::default() };
//! let resolution = resolver::resolve_anagrams("RNEOAS", &dictionary, options)?;
//!
//! assert_eq!(resolution.len(), 3);
//! assert!(resolution.contains("ARE SON"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reusing an Index Across Queries
//!
//! ```
//! use anagrammary::dictionary::Dictionary;
//! use anagrammary::resolver::{Resolver, ResolveOptions, ResolveStatus};
//!
//! let dictionary = Dictionary::from_words(["listen", "silent", "tinsel"]);
//! let resolver = Resolver::new(&dictionary, ResolveOptions::default())?;
//!
//! let mut streamed = Vec::new();
//! let resolution = resolver.resolve_with_sink("NETSIL", |found| streamed.push(found.to_string()))?;
//! assert_eq!(streamed, resolution.results);
//!
//! assert_eq!(resolver.resolve("?")?.status, ResolveStatus::NoMatches);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::dictionary::{Dictionary, DictionaryError, DictionarySource};
use crate::errors::ParseError;
use crate::evaluator::Evaluator;
use crate::fingerprint::Fingerprint;
use crate::index::{AnagramIndex, IndexError, MAX_WORDS};
use crate::template::QueryTemplate;
use log::{debug, info, warn};
use rustc_hash::FxHashSet;
use std::collections::HashSet;

/// Above this many candidate letter sequences we warn before searching.
pub const CANDIDATE_WARNING: u128 = 1_000_000;

/// Knobs for one resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveOptions {
    /// Most words per anagram, 1..=3.
    pub max_words: usize,
    /// Keep only dictionary words scoring at least this much.
    pub quality_threshold: Option<f64>,
}

impl ResolveOptions {
    /// Check the options without doing any work.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnsupportedWordCount`] if `max_words` is outside 1..=3.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.max_words == 0 || self.max_words > MAX_WORDS {
            return Err(ResolveError::UnsupportedWordCount { requested: self.max_words, max: MAX_WORDS });
        }
        Ok(())
    }
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions { max_words: 1, quality_threshold: None }
    }
}

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    /// At least one anagram found.
    Found,
    /// The specification had letters but nothing in the dictionary matched.
    NoMatches,
    /// The specification had no letters and no unknown positions.
    EmptyQuery,
}

/// Deduplicated anagrams in the order they were first found.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Space-joined word tuples, first-seen order.
    pub results: Vec<String>,
    pub status: ResolveStatus,
    /// Candidate letter sequences looked up.
    pub candidates_examined: usize,
    /// Results found again after their first appearance.
    pub duplicates_dropped: usize,
}

impl Resolution {
    fn empty_query() -> Self {
        Resolution { results: Vec::new(), status: ResolveStatus::EmptyQuery, candidates_examined: 0, duplicates_dropped: 0 }
    }

    #[must_use]
    pub fn contains(&self, result: &str) -> bool {
        self.results.iter().any(|r| r == result)
    }

    /// The results as a set, for order-insensitive comparison.
    #[must_use]
    pub fn as_set(&self) -> HashSet<&str> {
        self.results.iter().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl IntoIterator for Resolution {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

/// Unified error type for the resolution pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The letter specification (or a candidate built from it) was malformed.
    #[error("parse failure: {0}")]
    ParseFailure(#[from] Box<ParseError>),

    /// More words per anagram than the index supports. Raised before any indexing work.
    #[error("unsupported word count {requested} (must be between 1 and {max})")]
    UnsupportedWordCount { requested: usize, max: usize },

    /// The word list could not be fetched.
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}

impl From<ParseError> for ResolveError {
    fn from(pe: ParseError) -> Self {
        ResolveError::ParseFailure(Box::new(pe))
    }
}

impl From<IndexError> for ResolveError {
    fn from(ie: IndexError) -> Self {
        match ie {
            IndexError::UnsupportedWordCount { requested, max } => ResolveError::UnsupportedWordCount { requested, max },
            IndexError::InvalidWord(pe) => pe.into(),
        }
    }
}

impl ResolveError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::ParseFailure(_) => "R001",
            ResolveError::UnsupportedWordCount { .. } => "R002",
            ResolveError::Dictionary(_) => "R003",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ResolveError::ParseFailure(_) => "Letter specification could not be parsed",
            ResolveError::UnsupportedWordCount { .. } => "Too many words per anagram requested",
            ResolveError::Dictionary(_) => "Word list could not be read",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ResolveError::ParseFailure(_) => "The letter specification could not be turned into letters. This wraps an underlying ParseError (see Parse Errors section for specific error codes).",
            ResolveError::UnsupportedWordCount { .. } => "Multi-word anagrams are indexed by combining every dictionary word with every other, so the index grows as (number of words)^N. N is capped at 3.",
            ResolveError::Dictionary(_) => "The word list file or standard input could not be read. No partial word list is ever used.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ResolveError::UnsupportedWordCount { .. } => Some("Use --max-words 1, 2 or 3"),
            ResolveError::Dictionary(de) => de.help(),
            ResolveError::ParseFailure(_) => None, // ParseError has its own help
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        match self {
            ResolveError::ParseFailure(pe) => {
                // delegate to ParseError's detailed display
                format!("{}\n  caused by: {}", self.code(), pe.display_detailed())
            }
            _ => crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help()),
        }
    }
}

/// An index built once, answering any number of specifications.
#[derive(Debug)]
pub struct Resolver {
    index: AnagramIndex,
}

impl Resolver {
    /// Index `dictionary`, filtered by `options.quality_threshold` with the default [`Evaluator`].
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnsupportedWordCount`] if `options.max_words` is outside 1..=3.
    pub fn new(dictionary: &Dictionary, options: ResolveOptions) -> Result<Self, ResolveError> {
        Self::with_evaluator(dictionary, options, &Evaluator::default())
    }

    /// Like [`Resolver::new`] with a caller-supplied [`Evaluator`].
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnsupportedWordCount`] if `options.max_words` is outside 1..=3.
    pub fn with_evaluator(
        dictionary: &Dictionary,
        options: ResolveOptions,
        evaluator: &Evaluator,
    ) -> Result<Self, ResolveError> {
        options.validate()?;
        let quality = options.quality_threshold.map(|threshold| (evaluator, threshold));
        let index = AnagramIndex::build(dictionary.canonical_words(quality), options.max_words)?;
        info!(
            "indexed {} of {} words into {} anagram entries (up to {} words each)",
            index.num_words(),
            dictionary.len(),
            index.len(),
            options.max_words
        );
        Ok(Resolver { index })
    }

    /// Wrap an already built index.
    #[must_use]
    pub fn from_index(index: AnagramIndex) -> Self {
        Resolver { index }
    }

    #[must_use]
    pub fn index(&self) -> &AnagramIndex {
        &self.index
    }

    /// Resolve a raw letter specification.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ParseFailure`] if `spec` is malformed.
    pub fn resolve(&self, spec: &str) -> Result<Resolution, ResolveError> {
        self.resolve_with_sink(spec, |_| {})
    }

    /// Resolve `spec`, handing each new result to `sink` as soon as it is found.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ParseFailure`] if `spec` is malformed.
    pub fn resolve_with_sink<F: FnMut(&str)>(&self, spec: &str, sink: F) -> Result<Resolution, ResolveError> {
        let template = QueryTemplate::create(spec)?;
        if template.is_empty() {
            warn!("no valid letters in \"{spec}\"");
            return Ok(Resolution::empty_query());
        }
        self.resolve_template(&template, sink)
    }

    /// Look up every candidate of `template`, keeping each distinct result once.
    ///
    /// # Errors
    ///
    /// [`ResolveError::ParseFailure`] if a candidate holds a letter outside A-Z.
    pub fn resolve_template<F: FnMut(&str)>(
        &self,
        template: &QueryTemplate,
        mut sink: F,
    ) -> Result<Resolution, ResolveError> {
        if template.is_empty() {
            return Ok(Resolution::empty_query());
        }

        let num_combos = template.count_unknown_combos();
        if num_combos > CANDIDATE_WARNING {
            warn!("\"{template}\" expands to {num_combos} candidate letter sequences; this may take a while");
        } else {
            debug!("\"{template}\" expands to {num_combos} candidate letter sequences");
        }

        let mut seen_results: FxHashSet<String> = FxHashSet::default();
        // Distinct candidates can share letters (e.g. "[AB][AB]" gives AB and BA)
        let mut seen_fingerprints: FxHashSet<Fingerprint> = FxHashSet::default();
        let mut results = Vec::new();
        let mut candidates_examined = 0;
        let mut duplicates_dropped = 0;

        for candidate in template.iterate_possibles() {
            candidates_examined += 1;
            let fingerprint = Fingerprint::of(&candidate)?;
            let grams = self.index.lookup_fingerprint(&fingerprint);
            if !seen_fingerprints.insert(fingerprint) {
                duplicates_dropped += grams.len();
                continue;
            }
            for gram in grams {
                let rendered = gram.to_string();
                if seen_results.contains(&rendered) {
                    duplicates_dropped += 1;
                    continue;
                }
                sink(&rendered);
                seen_results.insert(rendered.clone());
                results.push(rendered);
            }
        }

        let status = if results.is_empty() { ResolveStatus::NoMatches } else { ResolveStatus::Found };
        debug!(
            "examined {candidates_examined} candidates: {} results, {duplicates_dropped} duplicates dropped",
            results.len()
        );

        Ok(Resolution { results, status, candidates_examined, duplicates_dropped })
    }
}

/// One-shot resolution: parse `spec`, index `dictionary`, look everything up.
///
/// An empty specification returns before any indexing.
///
/// # Errors
///
/// [`ResolveError::UnsupportedWordCount`] (checked first) or [`ResolveError::ParseFailure`].
pub fn resolve_anagrams(spec: &str, dictionary: &Dictionary, options: ResolveOptions) -> Result<Resolution, ResolveError> {
    resolve_anagrams_with_sink(spec, dictionary, options, |_| {})
}

/// [`resolve_anagrams`], streaming each new result to `sink`.
///
/// # Errors
///
/// Same as [`resolve_anagrams`].
pub fn resolve_anagrams_with_sink<F: FnMut(&str)>(
    spec: &str,
    dictionary: &Dictionary,
    options: ResolveOptions,
    sink: F,
) -> Result<Resolution, ResolveError> {
    options.validate()?;
    let template = QueryTemplate::create(spec)?;
    if template.is_empty() {
        warn!("no valid letters in \"{spec}\"");
        return Ok(Resolution::empty_query());
    }
    Resolver::new(dictionary, options)?.resolve_template(&template, sink)
}

/// Load the word list from `source`, then [`resolve_anagrams`].
///
/// # Errors
///
/// [`ResolveError::Dictionary`] if the source cannot be read, otherwise as [`resolve_anagrams`].
pub fn resolve_from_source(
    spec: &str,
    source: &DictionarySource,
    options: ResolveOptions,
) -> Result<Resolution, ResolveError> {
    options.validate()?;
    let dictionary = Dictionary::load(source)?;
    resolve_anagrams(spec, &dictionary, options)
}
