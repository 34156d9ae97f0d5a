//! Error types for letter specifications and fingerprints, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (E001-E007) for documentation lookup:
//!
//! - E001: `InvalidLetter` (Character outside A-Z reached the fingerprint)
//! - E002: `InvalidWordLetters` (Word contains a character outside A-Z)
//! - E003: `LetterCountOverflow` (Too many repeats of one letter)
//! - E004: `UnterminatedPool` (`[` never closed)
//! - E005: `UnmatchedPoolClose` (`]` without an opening `[`)
//! - E006: `NestedPool` (`[` inside a pool)
//! - E007: `EmptyPool` (`[]` with no letters)
//!
//! # Examples
//!
//! ```
//! use anagrammary::errors::ParseError;
//! use anagrammary::template::QueryTemplate;
//!
//! match "AB[CD".parse::<QueryTemplate>() {
//!     Err(e) => {
//!         assert_eq!(e.code(), "E004");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

/// Errors raised while turning text into letters: template grammar and alphabet violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid letter '{invalid_char}' (only A-Z allowed)")]
    InvalidLetter { invalid_char: char },

    #[error("\"{word}\" contains invalid character '{invalid_char}' (only A-Z allowed)")]
    InvalidWordLetters { word: String, invalid_char: char },

    #[error("Letter '{letter}' repeats more than {max} times")]
    LetterCountOverflow { letter: char, max: usize },

    #[error("Unterminated letter pool starting at position {position} in \"{spec}\"")]
    UnterminatedPool { spec: String, position: usize },

    #[error("Unmatched ']' at position {position} in \"{spec}\"")]
    UnmatchedPoolClose { spec: String, position: usize },

    #[error("Nested '[' at position {position} in \"{spec}\"")]
    NestedPool { spec: String, position: usize },

    #[error("Empty letter pool at position {position} in \"{spec}\"")]
    EmptyPool { spec: String, position: usize },
}

impl ParseError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::InvalidLetter { .. } => "E001",
            ParseError::InvalidWordLetters { .. } => "E002",
            ParseError::LetterCountOverflow { .. } => "E003",
            ParseError::UnterminatedPool { .. } => "E004",
            ParseError::UnmatchedPoolClose { .. } => "E005",
            ParseError::NestedPool { .. } => "E006",
            ParseError::EmptyPool { .. } => "E007",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ParseError::InvalidLetter { .. } => "Character outside A-Z",
            ParseError::InvalidWordLetters { .. } => "Word contains a character outside A-Z",
            ParseError::LetterCountOverflow { .. } => "Too many repeats of one letter",
            ParseError::UnterminatedPool { .. } => "Letter pool never closed",
            ParseError::UnmatchedPoolClose { .. } => "Closing bracket without a pool",
            ParseError::NestedPool { .. } => "Letter pool opened inside another pool",
            ParseError::EmptyPool { .. } => "Letter pool with no letters",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            ParseError::InvalidLetter { .. } => "Fingerprints are defined over the 26 letters A-Z. Any other character reaching the fingerprint indicates that the caller did not canonicalize its input first.",
            ParseError::InvalidWordLetters { .. } => "A word handed to the fingerprint contains a character outside A-Z. Dictionary words are canonicalized on load, so this usually means raw text was passed directly.",
            ParseError::LetterCountOverflow { .. } => "A fingerprint stores at most 4294967295 copies of each letter. Longer inputs are not meaningful anagram queries.",
            ParseError::UnterminatedPool { .. } => "A '[' opened a restricted letter pool but the specification ended before the matching ']'.",
            ParseError::UnmatchedPoolClose { .. } => "A ']' appeared while no letter pool was open.",
            ParseError::NestedPool { .. } => "Letter pools cannot contain other letter pools. Each '[...]' stands for exactly one position.",
            ParseError::EmptyPool { .. } => "A '[]' pool offers no letters for its position, so no candidate could ever be produced.",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            ParseError::InvalidLetter { .. } | ParseError::InvalidWordLetters { .. } => Some("Only the letters A-Z (in either case) can be fingerprinted"),
            ParseError::UnterminatedPool { .. } => Some("Close the pool with ']' (e.g., 'ABC[DE]F')"),
            ParseError::UnmatchedPoolClose { .. } => Some("Remove the stray ']' or open the pool with '[' (e.g., '[DE]')"),
            ParseError::NestedPool { .. } => Some("List every allowed letter in a single pool (e.g., '[DEF]' rather than '[D[EF]]')"),
            ParseError::EmptyPool { .. } => Some("Put at least one letter in the pool, or use '?' for any letter"),
            ParseError::LetterCountOverflow { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<ParseError> {
        vec![
            ParseError::InvalidLetter { invalid_char: '1' },
            ParseError::InvalidWordLetters { word: "AB1".to_string(), invalid_char: '1' },
            ParseError::LetterCountOverflow { letter: 'A', max: u32::MAX as usize },
            ParseError::UnterminatedPool { spec: "AB[C".to_string(), position: 2 },
            ParseError::UnmatchedPoolClose { spec: "AB]".to_string(), position: 2 },
            ParseError::NestedPool { spec: "[A[B]]".to_string(), position: 2 },
            ParseError::EmptyPool { spec: "A[]".to_string(), position: 1 },
        ]
    }

    #[test]
    fn test_error_codes_and_help() {
        let err = ParseError::UnterminatedPool { spec: "AB[C".to_string(), position: 2 };
        assert_eq!(err.code(), "E004");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("E004"));
        assert!(detailed.contains("']'"));
    }

    /// Test that all `ParseError` variants have unique error codes
    #[test]
    fn test_all_error_codes_are_unique() {
        let mut codes = std::collections::HashSet::new();
        for err in all_variants() {
            let code = err.code();
            assert!(code.starts_with('E'), "Error code '{}' should start with 'E'", code);
            assert!(codes.insert(code), "Duplicate error code found: {}", code);
        }
        assert_eq!(codes.len(), 7);
    }

    /// Test that all error codes follow the format E0XX
    #[test]
    fn test_error_code_format() {
        for err in all_variants() {
            let code = err.code();
            assert_eq!(code.len(), 4, "Error code '{}' should be 4 characters (E0XX)", code);
            assert!(code[1..].parse::<u16>().is_ok(), "Error code '{}' should end with a number", code);
        }
    }

    #[test]
    fn test_help_text_differs_from_message() {
        for err in all_variants() {
            if let Some(help_text) = err.help() {
                assert!(help_text.len() > 10, "Help text for {:?} should be substantial", err);
                assert_ne!(help_text, err.to_string());
            }
        }
    }

    #[test]
    fn test_display_detailed_includes_position() {
        let err = ParseError::NestedPool { spec: "[A[B]]".to_string(), position: 2 };
        let detailed = err.display_detailed();
        assert!(detailed.contains("position 2"));
        assert!(detailed.contains("[A[B]]"));
        assert!(detailed.contains(err.code()));
    }
}
