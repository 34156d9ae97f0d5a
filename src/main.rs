use clap::Parser;
use log::{info, LevelFilter};
use std::process::ExitCode;
use std::time::Instant;

use anagrammary::dictionary::{Dictionary, DictionarySource};
use anagrammary::evaluator::STRICT_THRESHOLD;
use anagrammary::resolver::{self, ResolveError, ResolveOptions, ResolveStatus};

/// Exit code when at least one anagram was printed.
const EXIT_FOUND: u8 = 0;
/// Exit code when the letters resolve to nothing.
const EXIT_NO_RESULTS: u8 = 1;
/// Exit code for any error.
const EXIT_ERROR: u8 = 2;

/// Anagram finder: single words and multi-word phrases
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Letters to rearrange; `?`, `_` or `.` is any letter, `[ABC]` is one of A, B or C
    letters: Vec<String>,

    /// Word list file (one word per line), or `-` for standard input [default: built-in list]
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Maximum number of words per anagram (1 to 3)
    #[arg(short, long, default_value_t = 1)]
    max_words: usize,

    /// Skip proper nouns, acronyms and words with apostrophes
    #[arg(long)]
    strict: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

/// Entry point of the anagram CLI.
///
/// Exits with 0 when anagrams were printed, 1 when there were none,
/// and 2 (after printing the error) when anything failed.
fn main() -> ExitCode {
    let cli = Cli::parse();
    anagrammary::log::init_logger(cli.log_level);

    let result = try_main(&cli);
    if let Err(e) = &result {
        eprintln!("Error: {}", e.display_detailed());
    }
    ExitCode::from(exit_code(&result))
}

/// Maps the outcome of a run onto the process exit status.
fn exit_code(result: &Result<ResolveStatus, ResolveError>) -> u8 {
    match result {
        Ok(ResolveStatus::Found) => EXIT_FOUND,
        Ok(ResolveStatus::NoMatches | ResolveStatus::EmptyQuery) => EXIT_NO_RESULTS,
        Err(_) => EXIT_ERROR,
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Validate options before touching the word list (which may be stdin).
/// 2. Load the word list.
/// 3. Resolve the letters, printing each anagram on stdout as it is found.
/// 4. Log timings and counts.
fn try_main(cli: &Cli) -> Result<ResolveStatus, ResolveError> {
    let options = ResolveOptions {
        max_words: cli.max_words,
        quality_threshold: cli.strict.then_some(STRICT_THRESHOLD),
    };
    options.validate()?;

    let source = DictionarySource::from_arg(cli.dictionary.as_deref());
    let t_load = Instant::now();
    let dictionary = Dictionary::load(&source)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    // Whitespace is insignificant, so the arguments simply join
    let spec = cli.letters.join(" ");
    let t_resolve = Instant::now();
    let resolution = resolver::resolve_anagrams_with_sink(&spec, &dictionary, options, |found| {
        println!("{found}");
    })?;
    let resolve_secs = t_resolve.elapsed().as_secs_f64();

    match resolution.status {
        ResolveStatus::Found => {}
        ResolveStatus::NoMatches => info!("no anagrams of \"{spec}\" in {source}"),
        ResolveStatus::EmptyQuery => info!("nothing to resolve"),
    }

    info!(
        "loaded {} words in {:.3}s; resolved in {:.3}s ({} anagrams from {} candidates, {} duplicates dropped)",
        dictionary.len(),
        load_secs,
        resolve_secs,
        resolution.len(),
        resolution.candidates_examined,
        resolution.duplicates_dropped
    );

    Ok(resolution.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anagrammary::errors::ParseError;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&Ok(ResolveStatus::Found)), 0);
        assert_eq!(exit_code(&Ok(ResolveStatus::NoMatches)), 1);
        assert_eq!(exit_code(&Ok(ResolveStatus::EmptyQuery)), 1);
        assert_eq!(exit_code(&Err(ResolveError::UnsupportedWordCount { requested: 4, max: 3 })), 2);
        let parse_failure = ResolveError::from(ParseError::UnmatchedPoolClose { spec: "CAT]".to_string(), position: 3 });
        assert_eq!(exit_code(&Err(parse_failure)), 2);
    }

    #[test]
    fn test_letters_are_optional() {
        let cli = Cli::try_parse_from(["anagrammary"]).unwrap();
        assert!(cli.letters.is_empty());
        assert_eq!(cli.max_words, 1);

        let cli = Cli::try_parse_from(["anagrammary", "-m", "2", "dirty", "room"]).unwrap();
        assert_eq!(cli.letters.join(" "), "dirty room");
        assert_eq!(cli.max_words, 2);
    }

    #[test]
    fn test_no_letters_is_an_empty_query() {
        let cli = Cli::try_parse_from(["anagrammary", "-l", "off"]).unwrap();
        assert_eq!(exit_code(&try_main(&cli)), EXIT_NO_RESULTS);
    }
}
