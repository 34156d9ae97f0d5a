//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of letter specifications on *your* machine.
//! - Loads the word list once, then resolves each case several times and reports the median.
//! - Index construction is part of every timed run, since it dominates for 2- and 3-word cases.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few anagrams:           `cargo run --bin bench_local --release -- -p 5`
//! - Custom word list:               `cargo run --bin bench_local --release -- -d /usr/share/dict/words`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - Cases live in `get_cases()` below.
//! - One warm-up run per case is done (not included in timing).
//! - We report the *median* over repeats (more robust than mean for small _N_).

use clap::Parser;
use std::hint::black_box;
use std::time::Instant;

use anagrammary::dictionary::{Dictionary, DictionarySource};
use anagrammary::resolver::{self, ResolveOptions};

/// Simple local benchmark runner: load word list once, time several specifications.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list file (one word per line) [default: built-in list]
    #[arg(short, long)]
    dictionary: Option<String>,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many anagrams per case (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// A benchmark case: the letter specification and how many words per anagram.
#[derive(Clone)]
struct Case {
    spec: &'static str,
    max_words: usize,
}

/// Edit/add new cases here. The summary displays the specification as the "name".
fn get_cases() -> Vec<Case> {
    vec![
        Case { spec: "RNEOAS", max_words: 1 },
        Case { spec: "SILENT", max_words: 1 },
        Case { spec: "TC?", max_words: 1 },
        Case { spec: "??E??", max_words: 1 },
        Case { spec: "[AEIOU]ST[AEIOU]R", max_words: 1 },
        Case { spec: "RNEOAS", max_words: 2 },
        Case { spec: "BOOKWORM", max_words: 2 },
        Case { spec: "DORMITORY", max_words: 2 },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_SPEC_LEN: usize = 24;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// One row in the benchmark summary: (case name, median seconds, number of anagrams).
    type SummaryRow = (String, f64, usize);

    let cli = Cli::parse();
    anagrammary::log::init_logger(log::LevelFilter::Warn);

    // Load the word list once. This I/O is *not* included in per-case timing.
    let source = DictionarySource::from_arg(cli.dictionary.as_deref());
    eprintln!("Loading word list from: {source}");
    let t_load = Instant::now();
    let dictionary = Dictionary::load(&source)?;
    let load_secs = t_load.elapsed().as_secs_f64();
    eprintln!("Loaded {} words in {:.3}s", dictionary.len(), load_secs);

    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let name = format!("{} (max {})", case.spec, case.max_words);
        eprintln!("\n[{:02}] {}", idx + 1, name);
        let options = ResolveOptions { max_words: case.max_words, ..ResolveOptions::default() };

        // One *warm-up* execution per case; its timing is ignored.
        if let Err(e) = resolver::resolve_anagrams(case.spec, &dictionary, options) {
            eprintln!("  ✗ Warm-up failed: {}", e.display_detailed());
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_results: Vec<String> = Vec::new();

        for rep in 0..cli.num_repeats {
            let t_resolve = Instant::now();
            let resolution = match resolver::resolve_anagrams(black_box(case.spec), &dictionary, options) {
                Ok(resolution) => resolution,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {}", rep + 1, cli.num_repeats, e);
                    continue;
                }
            };
            let resolve_secs = t_resolve.elapsed().as_secs_f64();

            // Prevent the compiler from proving the result unused and eliding work.
            let _keep = black_box(resolution.len());

            times.push(resolve_secs);
            last_results = resolution.results;

            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} {})",
                rep + 1,
                cli.num_repeats,
                resolve_secs,
                last_results.len(),
                pluralizer(last_results.len(), "anagram".into(), None)
            );
        }

        let med = median(times);

        // Optionally print a few anagrams from the *last* run (outside timing).
        for result in last_results.iter().take(cli.print_limit) {
            println!("{result}");
        }

        eprintln!(
            "  → median {:.3}s over {} {}",
            med,
            cli.num_repeats,
            pluralizer(cli.num_repeats, "run".into(), None)
        );

        summary.push((name, med, last_results.len()));
    }

    // Compact summary at the end for a quick scan across all cases.
    eprintln!("\n==== Summary ====");
    eprintln!("{:<MAX_SPEC_LEN$} | {:>10} | {:>10}", "case", "median (s)", "# anagrams");
    eprintln!("{:-<MAX_SPEC_LEN$}-+-{:-<10}-+-{:-<10}", "", "", "");
    for (name, med, num_results) in &summary {
        let display = if name.chars().count() > MAX_SPEC_LEN {
            // "- 1" for the "…"
            format!("{}…", name.chars().take(MAX_SPEC_LEN - 1).collect::<String>())
        } else {
            name.clone()
        };
        eprintln!("{display:<MAX_SPEC_LEN$} | {med:>10.3} | {num_results:>10}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralizer() {
        assert_eq!(pluralizer(0, "anagram".into(), None), "anagrams");
        assert_eq!(pluralizer(1, "anagram".into(), None), "anagram");
        assert_eq!(pluralizer(2, "anagram".into(), None), "anagrams");
        assert_eq!(pluralizer(1, "radius".into(), Some("radii".into())), "radius");
        assert_eq!(pluralizer(2, "radius".into(), Some("radii".into())), "radii");
    }

    #[test]
    fn test_median() {
        assert_eq!(median(vec![]), 0.0);
        assert_eq!(median(vec![3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(vec![4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_cases_are_valid() {
        for case in get_cases() {
            let options = ResolveOptions { max_words: case.max_words, ..ResolveOptions::default() };
            assert!(options.validate().is_ok(), "{}", case.spec);
            assert!(case.spec.parse::<anagrammary::template::QueryTemplate>().is_ok(), "{}", case.spec);
        }
    }
}
