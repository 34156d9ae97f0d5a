//! Order-independent multiset fingerprints of letter sequences.
//!
//! A [`Fingerprint`] records how many times each of A-Z occurs. Two inputs share a
//! fingerprint exactly when one is a rearrangement of the other, so an anagram test
//! collapses to a hash-map lookup. The classic prime-product "soul" is available via
//! [`Fingerprint::soul`] but is not used as a key: it overflows any fixed-width integer
//! for long phrases, while the count vector never collides.

use crate::alphabet::{letter_index, ALPHABET, ALPHABET_SIZE, LETTER_PRIMES};
use crate::errors::ParseError;
use std::fmt;
use std::str::FromStr;

/// Per-letter multiplicities over A-Z.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fingerprint {
    char_counts: [u32; ALPHABET_SIZE],
    len: usize,
}

impl Fingerprint {
    /// Fingerprint of a flat letter sequence. Case-insensitive.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidWordLetters`] if any char is outside A-Z,
    /// [`ParseError::LetterCountOverflow`] if one letter repeats more than `u32::MAX` times.
    pub fn of(letters: &str) -> Result<Self, ParseError> {
        let mut fingerprint = Fingerprint::default();
        fingerprint.absorb(letters)?;
        Ok(fingerprint)
    }

    /// Fingerprint of a phrase: every letter of every word, as if concatenated.
    ///
    /// # Errors
    ///
    /// Same as [`Fingerprint::of`].
    pub fn of_phrase<S: AsRef<str>>(words: &[S]) -> Result<Self, ParseError> {
        let mut fingerprint = Fingerprint::default();
        for word in words {
            fingerprint.absorb(word.as_ref())?;
        }
        Ok(fingerprint)
    }

    fn absorb(&mut self, letters: &str) -> Result<(), ParseError> {
        for c in letters.chars() {
            let idx = letter_index(c).map_err(|e| {
                // Wrap with the word for context
                if let ParseError::InvalidLetter { invalid_char } = e {
                    ParseError::InvalidWordLetters { word: letters.to_string(), invalid_char }
                } else {
                    e
                }
            })?;
            self.bump(idx, 1)?;
        }
        Ok(())
    }

    fn bump(&mut self, idx: usize, by: u32) -> Result<(), ParseError> {
        self.char_counts[idx] = self.char_counts[idx]
            .checked_add(by)
            .ok_or(ParseError::LetterCountOverflow { letter: ALPHABET.as_bytes()[idx] as char, max: u32::MAX as usize })?;
        self.len += by as usize;
        Ok(())
    }

    /// Fingerprint of the union of both multisets.
    ///
    /// # Errors
    ///
    /// [`ParseError::LetterCountOverflow`] if a combined count exceeds `u32::MAX`.
    pub fn combine(&self, other: &Fingerprint) -> Result<Fingerprint, ParseError> {
        let mut combined = *self;
        for (idx, &count) in other.char_counts.iter().enumerate() {
            if count > 0 {
                combined.bump(idx, count)?;
            }
        }
        Ok(combined)
    }

    /// Total number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// How many times `letter` occurs; 0 for anything outside A-Z.
    #[must_use]
    pub fn count(&self, letter: char) -> usize {
        letter_index(letter).map_or(0, |idx| self.char_counts[idx] as usize)
    }

    /// Product of the primes of every letter, or `None` if it does not fit in a `u128`.
    #[must_use]
    pub fn soul(&self) -> Option<u128> {
        let mut soul: u128 = 1;
        for (idx, &count) in self.char_counts.iter().enumerate() {
            for _ in 0..count {
                soul = soul.checked_mul(LETTER_PRIMES[idx])?;
            }
        }
        Some(soul)
    }

    /// The letters in alphabetical order ("alphagram").
    #[must_use]
    pub fn alphagram(&self) -> String {
        ALPHABET
            .chars()
            .zip(self.char_counts.iter())
            .flat_map(|(c, &count)| std::iter::repeat(c).take(count as usize))
            .collect()
    }
}

impl FromStr for Fingerprint {
    type Err = ParseError;

    fn from_str(letters: &str) -> Result<Self, Self::Err> {
        Fingerprint::of(letters)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.alphagram())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alphagram())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_independent() {
        let base = Fingerprint::of("LISTEN").unwrap();
        for perm in ["SILENT", "ENLIST", "TINSEL", "INLETS", "listen"] {
            assert_eq!(base, Fingerprint::of(perm).unwrap(), "{perm} should match LISTEN");
        }
    }

    #[test]
    fn test_composition_differs() {
        assert_ne!(Fingerprint::of("AAB").unwrap(), Fingerprint::of("ABB").unwrap());
        assert_ne!(Fingerprint::of("AB").unwrap(), Fingerprint::of("ABC").unwrap());
        assert_ne!(Fingerprint::of("").unwrap(), Fingerprint::of("A").unwrap());
    }

    #[test]
    fn test_phrase_equals_concatenation() {
        let phrase = Fingerprint::of_phrase(&["BOOK", "WORM"]).unwrap();
        assert_eq!(phrase, Fingerprint::of("BOOKWORM").unwrap());
        assert_eq!(phrase, Fingerprint::of_phrase(&["WORM", "BOOK"]).unwrap());
    }

    #[test]
    fn test_combine_matches_phrase() {
        let book = Fingerprint::of("BOOK").unwrap();
        let worm = Fingerprint::of("WORM").unwrap();
        assert_eq!(book.combine(&worm).unwrap(), Fingerprint::of("BOOKWORM").unwrap());
    }

    #[test]
    fn test_invalid_letter_fails_loudly() {
        let err = Fingerprint::of("AB1").unwrap_err();
        assert_eq!(err, ParseError::InvalidWordLetters { word: "AB1".to_string(), invalid_char: '1' });
        assert!(Fingerprint::of("CAFÉ").is_err());
        assert!(Fingerprint::of("A B").is_err());
    }

    #[test]
    fn test_long_runs_of_one_letter() {
        let many = Fingerprint::of(&"A".repeat(300)).unwrap();
        assert_eq!(many.count('A'), 300);
        let doubled = many.combine(&many).unwrap();
        assert_eq!(doubled.count('A'), 600);
        assert_eq!(doubled.len(), 600);
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut full = Fingerprint::default();
        full.char_counts[0] = u32::MAX;
        let err = full.combine(&Fingerprint::of("A").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::LetterCountOverflow { letter: 'A', .. }));
        assert!(full.combine(&Fingerprint::of("B").unwrap()).is_ok());
    }

    #[test]
    fn test_soul_is_prime_product() {
        assert_eq!(Fingerprint::of("").unwrap().soul(), Some(1));
        assert_eq!(Fingerprint::of("A").unwrap().soul(), Some(2));
        assert_eq!(Fingerprint::of("CAB").unwrap().soul(), Some(2 * 3 * 5));
        assert_eq!(Fingerprint::of("ZZ").unwrap().soul(), Some(101 * 101));
        assert_eq!(Fingerprint::of(&"Z".repeat(40)).unwrap().soul(), None);
    }

    #[test]
    fn test_len_count_and_alphagram() {
        let fp: Fingerprint = "banana".parse().unwrap();
        assert_eq!(fp.len(), 6);
        assert_eq!(fp.count('A'), 3);
        assert_eq!(fp.count('n'), 2);
        assert_eq!(fp.count('?'), 0);
        assert_eq!(fp.alphagram(), "AAABNN");
        assert_eq!(format!("{fp:?}"), "Fingerprint(AAABNN)");
        assert!(Fingerprint::default().is_empty());
    }
}
