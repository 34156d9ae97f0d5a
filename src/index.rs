//! The anagram index: fingerprint -> every gram (1..=N dictionary words) with those letters.
//!
//! # Construction
//!
//! Single words are indexed first. Each further round extends every gram of the
//! previous round by every dictionary word, so round `k` holds exactly `|words|^k`
//! grams. Rounds only read the previous generation, never the map being filled.
//!
//! Word order inside a gram is kept: `("BOOK", "WORM")` and `("WORM", "BOOK")` are
//! distinct grams in the same bucket, and a word may repeat (`("A", "A")`).
//!
//! # Examples
//!
//! ```
//! use anagrammary::index::AnagramIndex;
//!
//! let index = AnagramIndex::build(["BOOK", "WORM", "BOOKWORM"], 2)?;
//! let mut found: Vec<String> = index.lookup("WORMBOOK")?.iter().map(ToString::to_string).collect();
//! found.sort();
//! assert_eq!(found, vec!["BOOK WORM", "BOOKWORM", "WORM BOOK"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::errors::ParseError;
use crate::fingerprint::Fingerprint;
use log::{debug, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::sync::Arc;

/// Hard upper bound on words per gram.
pub const MAX_WORDS: usize = 3;

/// Above this many grams we warn before building.
pub const CAPACITY_WARNING_GRAMS: u128 = 10_000_000;

/// One decomposition of a letter multiset into dictionary words, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gram(Vec<Arc<str>>);

impl Gram {
    fn single(word: &Arc<str>) -> Self {
        Gram(vec![Arc::clone(word)])
    }

    fn extended(&self, word: &Arc<str>) -> Self {
        let mut words = Vec::with_capacity(self.0.len() + 1);
        words.extend(self.0.iter().cloned());
        words.push(Arc::clone(word));
        Gram(words)
    }

    /// The words of this gram, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(AsRef::as_ref)
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Gram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}

/// Failures while building an [`AnagramIndex`]. Callers of the resolver see these as
/// [`ResolveError`](crate::resolver::ResolveError) codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("unsupported word count {requested} (must be between 1 and {max})")]
    UnsupportedWordCount { requested: usize, max: usize },

    #[error("cannot index word: {0}")]
    InvalidWord(#[from] ParseError),
}

/// Immutable fingerprint -> grams mapping.
#[derive(Debug, Default)]
pub struct AnagramIndex {
    buckets: FxHashMap<Fingerprint, Vec<Gram>>,
    max_words: usize,
    num_words: usize,
    num_grams: usize,
}

impl AnagramIndex {
    /// Build an index over canonical (A-Z only) words, with grams of up to `max_words` words.
    ///
    /// Duplicate and empty words are skipped. Cost and memory grow as `|words|^max_words`.
    ///
    /// # Errors
    ///
    /// [`IndexError::UnsupportedWordCount`] before doing any work if `max_words` is 0 or
    /// above [`MAX_WORDS`]; [`IndexError::InvalidWord`] if a word is not canonical.
    pub fn build<I, S>(canonical_words: I, max_words: usize) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if max_words == 0 || max_words > MAX_WORDS {
            return Err(IndexError::UnsupportedWordCount { requested: max_words, max: MAX_WORDS });
        }

        let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();
        let mut words: Vec<(Arc<str>, Fingerprint)> = Vec::new();
        for raw in canonical_words {
            let raw = raw.as_ref();
            if raw.is_empty() || seen.contains(raw) {
                continue;
            }
            let fingerprint = Fingerprint::of(raw)?;
            let word: Arc<str> = Arc::from(raw);
            seen.insert(Arc::clone(&word));
            words.push((word, fingerprint));
        }

        let projected = (words.len() as u128).saturating_pow(max_words as u32);
        if projected > CAPACITY_WARNING_GRAMS {
            warn!(
                "indexing {} words with up to {} words per anagram produces about {} entries; this may exhaust memory",
                words.len(),
                max_words,
                projected
            );
        }

        let mut index = AnagramIndex { buckets: FxHashMap::default(), max_words, num_words: words.len(), num_grams: 0 };

        let mut generation: Vec<(Gram, Fingerprint)> = words
            .iter()
            .map(|(word, fingerprint)| (Gram::single(word), *fingerprint))
            .collect();
        for (gram, fingerprint) in &generation {
            index.insert(*fingerprint, gram.clone());
        }
        debug!("indexed {} single words", generation.len());

        for round in 2..=max_words {
            let keep_generation = round < max_words;
            let mut next = Vec::with_capacity(if keep_generation { generation.len().saturating_mul(words.len()) } else { 0 });
            for (gram, gram_fingerprint) in &generation {
                for (word, word_fingerprint) in &words {
                    let extended = gram.extended(word);
                    let fingerprint = gram_fingerprint.combine(word_fingerprint)?;
                    if keep_generation {
                        next.push((extended.clone(), fingerprint));
                    }
                    index.insert(fingerprint, extended);
                }
            }
            debug!("round {round}: index now holds {} grams in {} buckets", index.num_grams, index.buckets.len());
            generation = next;
        }

        Ok(index)
    }

    fn insert(&mut self, fingerprint: Fingerprint, gram: Gram) {
        self.buckets.entry(fingerprint).or_default().push(gram);
        self.num_grams += 1;
    }

    /// Every gram whose letters are a rearrangement of `letters`. Empty if none.
    ///
    /// # Errors
    ///
    /// Fails if `letters` contains anything outside A-Z.
    pub fn lookup(&self, letters: &str) -> Result<&[Gram], ParseError> {
        Ok(self.lookup_fingerprint(&Fingerprint::of(letters)?))
    }

    /// Every gram with the given fingerprint. Empty if none.
    #[must_use]
    pub fn lookup_fingerprint(&self, fingerprint: &Fingerprint) -> &[Gram] {
        self.buckets.get(fingerprint).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every gram as a space-joined string, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = String> + '_ {
        self.buckets.values().flatten().map(ToString::to_string)
    }

    /// Total number of grams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.num_grams
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.num_grams == 0
    }

    /// Number of distinct words the grams are built from.
    #[must_use]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    /// Number of distinct fingerprints.
    #[must_use]
    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn max_words(&self) -> usize {
        self.max_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn found(index: &AnagramIndex, letters: &str) -> HashSet<String> {
        index.lookup(letters).unwrap().iter().map(ToString::to_string).collect()
    }

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_lookup_single_words() {
        let index = AnagramIndex::build(
            ["SHALE", "HEALS", "HEELS", "LEASH", "HALEST", "THEIR", "THERE", "WHERE", "HERE"],
            1,
        )
        .unwrap();
        assert!(found(&index, "").is_empty());
        assert_eq!(found(&index, "ALESH"), set(&["SHALE", "HEALS", "LEASH"]));
        assert!(found(&index, "BOOGIE").is_empty());
        assert_eq!(found(&index, "HEWER"), set(&["WHERE"]));
    }

    #[test]
    fn test_every_word_finds_itself() {
        let words = ["CAT", "ACT", "DOG", "GOD", "BIRD"];
        let index = AnagramIndex::build(words, 1).unwrap();
        for word in words {
            assert!(found(&index, word).contains(word), "{word} should find itself");
        }
    }

    #[test]
    fn test_two_word_grams_keep_order() {
        let index = AnagramIndex::build(["A", "B", "C"], 2).unwrap();
        assert_eq!(found(&index, "AB"), set(&["A B", "B A"]));
        assert_eq!(found(&index, "AA"), set(&["A A"]));
    }

    #[test]
    fn test_compound_word_and_its_parts_share_bucket() {
        let index = AnagramIndex::build(["BOOK", "WORM", "BOOKWORM", "FOO", "BAR"], 2).unwrap();
        assert_eq!(found(&index, "BOOKWORM"), set(&["BOOKWORM", "BOOK WORM", "WORM BOOK"]));
    }

    #[test]
    fn test_gram_counts_grow_per_round() {
        let words = ["A", "B", "C"];
        assert_eq!(AnagramIndex::build(words, 1).unwrap().len(), 3);
        assert_eq!(AnagramIndex::build(words, 2).unwrap().len(), 3 + 9);
        assert_eq!(AnagramIndex::build(words, 3).unwrap().len(), 3 + 9 + 27);
    }

    #[test]
    fn test_three_word_grams() {
        let index = AnagramIndex::build(["A", "B"], 3).unwrap();
        assert_eq!(found(&index, "AAB"), set(&["A A B", "A B A", "B A A"]));
        assert_eq!(index.max_words(), 3);
    }

    #[test]
    fn test_duplicates_and_empty_words_are_skipped() {
        let index = AnagramIndex::build(["CAT", "CAT", "", "ACT"], 1).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.num_words(), 2);
        assert_eq!(index.num_buckets(), 1);
        assert_eq!(found(&index, "TAC"), set(&["CAT", "ACT"]));
    }

    #[test]
    fn test_unsupported_word_count_fails_fast() {
        assert_eq!(
            AnagramIndex::build(["A"], 4).unwrap_err(),
            IndexError::UnsupportedWordCount { requested: 4, max: MAX_WORDS }
        );
        assert!(AnagramIndex::build(["A"], 0).is_err());
    }

    #[test]
    fn test_non_canonical_word_is_rejected() {
        let err = AnagramIndex::build(["CAN'T"], 1).unwrap_err();
        assert!(matches!(err, IndexError::InvalidWord(ParseError::InvalidWordLetters { invalid_char: '\'', .. })));
    }

    #[test]
    fn test_long_word_does_not_break_multi_word_grams() {
        let long = "A".repeat(200);
        let index = AnagramIndex::build([long.as_str(), "CAT"], 2).unwrap();
        assert_eq!(found(&index, "TAC"), set(&["CAT"]));
        assert_eq!(found(&index, "TACTAC"), set(&["CAT CAT"]));
        assert_eq!(index.lookup(&"A".repeat(400)).unwrap().len(), 1);
        assert_eq!(index.len(), 2 + 4);
    }

    #[test]
    fn test_lookup_rejects_invalid_letters() {
        let index = AnagramIndex::build(["CAT"], 1).unwrap();
        assert!(index.lookup("C4T").is_err());
        assert_eq!(found(&index, "tac"), set(&["CAT"]));
    }

    #[test]
    fn test_values_lists_every_gram() {
        let index = AnagramIndex::build(["AB", "C"], 2).unwrap();
        let mut values: Vec<String> = index.values().collect();
        values.sort();
        assert_eq!(values, vec!["AB", "AB AB", "AB C", "C", "C AB", "C C"]);
        // restartable
        assert_eq!(index.values().count(), 6);
    }

    #[test]
    fn test_gram_accessors() {
        let index = AnagramIndex::build(["BOOK", "WORM"], 2).unwrap();
        let grams = index.lookup("BOOKWORM").unwrap();
        assert_eq!(grams.len(), 2);
        for gram in grams {
            assert_eq!(gram.len(), 2);
            assert!(!gram.is_empty());
            let words: Vec<&str> = gram.words().collect();
            assert!(words == ["BOOK", "WORM"] || words == ["WORM", "BOOK"]);
        }
    }

    #[test]
    fn test_index_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnagramIndex>();
    }
}
