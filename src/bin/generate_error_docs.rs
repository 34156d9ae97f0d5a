//! Generate error code documentation from the source of truth (error enums).
//!
//! This binary reads the error codes, descriptions, details, and help text
//! directly from the `ParseError`, `ResolveError` and `DictionaryError`
//! implementations via their `code()`, `description()`, `details()`, and `help()` methods.
//!
//! Run with:
//! ```bash
//! cargo run --bin generate_error_docs > docs/ERROR_CODES.md
//! ```

use anagrammary::dictionary::DictionaryError;
use anagrammary::errors::ParseError;
use anagrammary::index::MAX_WORDS;
use anagrammary::resolver::ResolveError;
use std::io;

/// Macro to generate error documentation for any error type
/// with `code()`, `description()`, `details()`, `help()`, and `display_detailed()` methods
macro_rules! generate_error_docs {
    ($errors:expr) => {
        for error in $errors {
            let code = error.code();
            let description = error.description();
            let details = error.details();
            let help = error.help();

            println!("### {}: {}\n", code, description);
            println!("**Details:** {}\n", details);

            if let Some(help_text) = help {
                println!("**How to fix:**");
                println!("```");
                println!("{}", help_text);
                println!("```\n");
            }

            println!("**Example error message:**");
            println!("```");
            println!("{}", error);
            println!("```\n");

            println!("**Detailed format:**");
            println!("```");
            println!("{}", error.display_detailed());
            println!("```\n");

            println!("---\n");
        }
    };
}

/// Helper to create all `ParseError` variants for documentation
fn all_parse_error_variants() -> Vec<ParseError> {
    vec![
        ParseError::InvalidLetter { invalid_char: '3' },
        ParseError::InvalidWordLetters { word: "CAFÉ".to_string(), invalid_char: 'É' },
        ParseError::LetterCountOverflow { letter: 'A', max: u32::MAX as usize },
        ParseError::UnterminatedPool { spec: "AB[CD".to_string(), position: 2 },
        ParseError::UnmatchedPoolClose { spec: "ABC]".to_string(), position: 3 },
        ParseError::NestedPool { spec: "A[B[C]]".to_string(), position: 3 },
        ParseError::EmptyPool { spec: "A[]B".to_string(), position: 1 },
    ]
}

/// Helper to create all `ResolveError` variants for documentation
fn all_resolve_error_variants() -> Vec<ResolveError> {
    vec![
        ResolveError::ParseFailure(Box::new(ParseError::UnterminatedPool { spec: "AB[CD".to_string(), position: 2 })),
        ResolveError::UnsupportedWordCount { requested: 4, max: MAX_WORDS },
        ResolveError::Dictionary(all_dictionary_error_variants().remove(0)),
    ]
}

/// Helper to create all `DictionaryError` variants for documentation
fn all_dictionary_error_variants() -> Vec<DictionaryError> {
    vec![DictionaryError::Read {
        origin: "words.txt".to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
    }]
}

fn main() {
    println!("# Error Code Reference\n");
    println!("**⚠️ This document is auto-generated from the source code. Do not edit manually.**\n");

    println!("## Table of Contents\n");
    println!("- [Resolve Errors (R001–R003)](#resolve-errors)");
    println!("- [Parse Errors (E001–E007)](#parse-errors)");
    println!("- [Dictionary Errors (D001)](#dictionary-errors)");
    println!("- [How to Use Error Codes](#how-to-use-error-codes)\n");

    generate_resolve_error_docs();
    generate_parse_error_docs();
    generate_dictionary_error_docs();

    println!("\n## How to Use Error Codes\n");
    println!("When you see an error like:\n");
    println!("```");
    println!("Error: Unterminated letter pool starting at position 2 in \"AB[CD\" (E004)");
    println!("Close the pool with ']' (e.g., 'ABC[DE]F')");
    println!("```\n");
    println!("1. Note the error code (e.g., `E004`)");
    println!("2. Look it up in this document for detailed explanation");
    println!("3. Follow the suggested resolution steps\n");

    println!("## Error Display Formats\n");
    println!("Errors are displayed in two formats:\n");
    println!("### Simple Format");
    println!("```");
    println!("Error: <message>");
    println!("```\n");
    println!("### Detailed Format (via `display_detailed()`)");
    println!("```");
    println!("<message> (<code>)");
    println!("<help text if available>");
    println!("```\n");
}

fn generate_resolve_error_docs() {
    println!("## Resolve Errors\n");
    println!("Top-level errors from the resolver. These wrap lower-level parse and dictionary errors or reject the options.\n");
    generate_error_docs!(all_resolve_error_variants());
}

fn generate_parse_error_docs() {
    println!("## Parse Errors\n");
    println!("Errors that occur when parsing letter specifications or fingerprinting words.\n");
    generate_error_docs!(all_parse_error_variants());
}

fn generate_dictionary_error_docs() {
    println!("## Dictionary Errors\n");
    println!("Errors that occur when loading a word list.\n");
    generate_error_docs!(all_dictionary_error_variants());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_is_documented_once() {
        let mut codes: Vec<&str> = all_parse_error_variants().iter().map(ParseError::code).collect();
        codes.extend(all_resolve_error_variants().iter().map(ResolveError::code));
        codes.extend(all_dictionary_error_variants().iter().map(DictionaryError::code));
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
        assert_eq!(total, 11);
    }
}
