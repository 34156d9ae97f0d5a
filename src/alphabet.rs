use crate::errors::ParseError;
use itertools::Either;
use unicode_normalization::UnicodeNormalization;

// Character-set constants
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const ALPHABET_SIZE: usize = 26;

/// Any of these stands for one position that may hold any letter.
pub const BLANK_MARKERS: &str = "?_.";
pub const POOL_OPEN: char = '[';
pub const POOL_CLOSE: char = ']';

/// The first 26 primes, assigned to A..Z in order.
pub const LETTER_PRIMES: [u128; ALPHABET_SIZE] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41,
    43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101,
];

pub(crate) trait AnagramChar {
    fn is_blank_marker(&self) -> bool;
    fn is_pool_open(&self) -> bool;
    fn is_pool_close(&self) -> bool;
}

impl AnagramChar for char {
    fn is_blank_marker(&self) -> bool {
        BLANK_MARKERS.contains(*self)
    }
    fn is_pool_open(&self) -> bool {
        *self == POOL_OPEN
    }
    fn is_pool_close(&self) -> bool {
        *self == POOL_CLOSE
    }
}

/// 'A' -> 0, 'B' -> 1, ..., 'Z' -> 25 (lowercase accepted).
///
/// # Errors
///
/// Returns [`ParseError::InvalidLetter`] for anything outside A-Z.
pub fn letter_index(c: char) -> Result<usize, ParseError> {
    (c.to_ascii_uppercase() as usize)
        .checked_sub('A' as usize)
        .filter(|&diff| diff < ALPHABET_SIZE)
        .ok_or(ParseError::InvalidLetter { invalid_char: c })
}

/// Letters that NFKD leaves alone but that readers treat as Latin letters.
fn ligature(c: char) -> Option<&'static str> {
    match c {
        'ß' => Some("SS"),
        'æ' | 'Æ' => Some("AE"),
        'œ' | 'Œ' => Some("OE"),
        'ø' | 'Ø' => Some("O"),
        'ł' | 'Ł' => Some("L"),
        'đ' | 'Đ' => Some("D"),
        'þ' | 'Þ' => Some("TH"),
        _ => None,
    }
}

/// Fold one character to the uppercase base letters it stands for.
///
/// `'é'` yields `E`, `'ß'` yields `S S`, `'\''` and `'3'` yield nothing.
pub fn fold_char(c: char) -> impl Iterator<Item = char> {
    match ligature(c) {
        Some(letters) => Either::Left(letters.chars()),
        None => Either::Right(
            std::iter::once(c)
                .nfkd()
                .filter(char::is_ascii_alphabetic)
                .map(|ch| ch.to_ascii_uppercase()),
        ),
    }
}

/// Fold a whole string, keeping only A-Z.
#[must_use]
pub fn fold_letters(raw: &str) -> String {
    raw.chars().flat_map(fold_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_index_uppercase_valid() {
        assert_eq!(letter_index('A').unwrap(), 0);
        assert_eq!(letter_index('B').unwrap(), 1);
        assert_eq!(letter_index('Z').unwrap(), 25);
    }

    #[test]
    fn test_letter_index_lowercase_valid() {
        assert_eq!(letter_index('a').unwrap(), 0);
        assert_eq!(letter_index('z').unwrap(), 25);
    }

    #[test]
    fn test_letter_index_out_of_range() {
        // '[' is one after 'Z', '@' is one before 'A'
        assert_eq!(letter_index('['), Err(ParseError::InvalidLetter { invalid_char: '[' }));
        assert!(letter_index('@').is_err());
        assert!(letter_index('5').is_err());
        assert!(letter_index('é').is_err());
    }

    #[test]
    fn test_blank_markers() {
        for c in ['?', '_', '.'] {
            assert!(c.is_blank_marker());
        }
        assert!(!'A'.is_blank_marker());
        assert!(!'['.is_blank_marker());
    }

    #[test]
    fn test_pool_brackets() {
        assert!('['.is_pool_open());
        assert!(']'.is_pool_close());
        assert!(!']'.is_pool_open());
    }

    #[test]
    fn test_primes_are_distinct_and_increasing() {
        assert!(LETTER_PRIMES.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(LETTER_PRIMES[0], 2);
        assert_eq!(LETTER_PRIMES[ALPHABET_SIZE - 1], 101);
    }

    #[test]
    fn test_fold_diacritics() {
        assert_eq!(fold_letters("café"), "CAFE");
        assert_eq!(fold_letters("Ångström"), "ANGSTROM");
        assert_eq!(fold_letters("naïve"), "NAIVE");
    }

    #[test]
    fn test_fold_ligatures() {
        assert_eq!(fold_letters("straße"), "STRASSE");
        assert_eq!(fold_letters("Æsop"), "AESOP");
        assert_eq!(fold_letters("ﬁne"), "FINE");
    }

    #[test]
    fn test_fold_strips_punctuation_and_digits() {
        assert_eq!(fold_letters("puzzle's\n"), "PUZZLES");
        assert_eq!(fold_letters("x-ray 2"), "XRAY");
        assert_eq!(fold_letters("'"), "");
    }

    #[test]
    fn test_alphabet_constants() {
        assert_eq!(ALPHABET.len(), ALPHABET_SIZE);
        assert!(ALPHABET.chars().all(|c| c.is_ascii_uppercase()));
    }
}
