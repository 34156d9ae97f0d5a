//! Load word lists and derive each word's canonical letters.
//!
//! A word list is plain text, one word per line. Each line becomes a [`DictionaryWord`]
//! holding both the line as written (its *rendering*, e.g. `"café"` or `"don't"`) and its
//! *canonical* form: letters only, diacritics folded, uppercase (`"CAFE"`, `"DONT"`).
//!
//! The parsing logic:
//! - Lines are trimmed; empty lines and lines starting with `#` are skipped.
//! - Lines whose canonical form is empty (e.g. `"123"`) are skipped.
//! - Words are deduplicated on their canonical form; the first rendering wins.
//! - Input order is otherwise preserved.
//!
//! Sources are a file, standard input, or the built-in list compiled into the binary.
//! A source that cannot be read is reported as a [`DictionaryError`], never as a
//! partially loaded dictionary.

use crate::alphabet::fold_letters;
use crate::evaluator::Evaluator;
use log::debug;
use rustc_hash::FxHashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead};
use std::path::PathBuf;

const BUILT_IN_WORDS: &str = include_str!("../data/default_words.txt");

/// One dictionary entry. Equality and hashing use only the canonical form.
#[derive(Debug, Clone)]
pub struct DictionaryWord {
    rendering: String,
    canonical: String,
}

impl DictionaryWord {
    #[must_use]
    pub fn new(rendering: impl Into<String>) -> Self {
        let rendering = rendering.into().trim().to_string();
        let canonical = Self::canonicalize(&rendering);
        DictionaryWord { rendering, canonical }
    }

    /// Letters only, diacritics folded, uppercase: `"puzzle's\n"` -> `"PUZZLES"`.
    #[must_use]
    pub fn canonicalize(raw: &str) -> String {
        fold_letters(raw.trim())
    }

    /// The word as it appeared in the source.
    #[must_use]
    pub fn rendering(&self) -> &str {
        &self.rendering
    }

    #[must_use]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for DictionaryWord {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for DictionaryWord {}

impl Hash for DictionaryWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

/// Where to get words from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DictionarySource {
    /// The list compiled into the crate.
    #[default]
    BuiltIn,
    Path(PathBuf),
    Stdin,
}

impl DictionarySource {
    /// `None` -> built-in list, `"-"` -> standard input, anything else -> a file path.
    #[must_use]
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            None => DictionarySource::BuiltIn,
            Some("-") => DictionarySource::Stdin,
            Some(path) => DictionarySource::Path(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::BuiltIn => f.write_str("<built-in word list>"),
            DictionarySource::Path(path) => write!(f, "{}", path.display()),
            DictionarySource::Stdin => f.write_str("<stdin>"),
        }
    }
}

/// Failure to fetch a word list.
///
/// - D001: `Read` (source missing or unreadable)
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("failed to read word list from '{origin}': {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
}

impl DictionaryError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            DictionaryError::Read { .. } => "D001",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            DictionaryError::Read { .. } => "Word list source missing or unreadable",
        }
    }

    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            DictionaryError::Read { .. } => "The word list file does not exist, cannot be opened, or is not valid UTF-8. The same applies to standard input when the source is '-'.",
        }
    }

    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            DictionaryError::Read { .. } => Some("Check the --dictionary path, or use '-' to read words from standard input"),
        }
    }

    #[must_use]
    pub fn display_detailed(&self) -> String {
        crate::errors::format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// A deduplicated, ordered set of dictionary words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<DictionaryWord>,
}

impl Dictionary {
    /// Build from raw renderings; canonicalizes and deduplicates.
    pub fn from_words<I, S>(renderings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let words: Vec<DictionaryWord> = renderings
            .into_iter()
            .map(DictionaryWord::new)
            .filter(|word| !word.canonical.is_empty() && seen.insert(word.canonical.clone()))
            .collect();
        Dictionary { words }
    }

    /// Parse a word list held in memory (one word per line).
    #[must_use]
    pub fn parse_from_str(contents: &str) -> Self {
        Self::from_words(contents.lines().filter_map(|raw_line| {
            let line = raw_line.trim();
            // Skip blank lines and comments
            if line.is_empty() || line.starts_with('#') {
                None
            } else {
                Some(line)
            }
        }))
    }

    /// Read a whole word list from `reader`. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Read`] if the reader fails or yields invalid UTF-8.
    pub fn from_reader<R: BufRead>(mut reader: R, origin: &str) -> Result<Self, DictionaryError> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .map_err(|source| DictionaryError::Read { origin: origin.to_string(), source })?;
        Ok(Self::parse_from_str(&contents))
    }

    /// Read a word list file.
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Read`] if the file is missing or unreadable.
    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, DictionaryError> {
        let path_ref = path.as_ref();
        let data = std::fs::read_to_string(path_ref).map_err(|source| DictionaryError::Read {
            origin: path_ref.display().to_string(),
            source,
        })?;
        Ok(Self::parse_from_str(&data))
    }

    /// The word list compiled into the crate.
    #[must_use]
    pub fn built_in() -> Self {
        Self::parse_from_str(BUILT_IN_WORDS)
    }

    /// Load from any [`DictionarySource`].
    ///
    /// # Errors
    ///
    /// [`DictionaryError::Read`] if a file or standard input cannot be read.
    pub fn load(source: &DictionarySource) -> Result<Self, DictionaryError> {
        let dictionary = match source {
            DictionarySource::BuiltIn => Self::built_in(),
            DictionarySource::Path(path) => Self::load_from_path(path)?,
            DictionarySource::Stdin => Self::from_reader(io::stdin().lock(), &source.to_string())?,
        };
        debug!("loaded {} words from {source}", dictionary.len());
        Ok(dictionary)
    }

    /// Canonical forms, optionally only of words scoring at least the threshold.
    pub fn canonical_words<'a>(
        &'a self,
        quality: Option<(&'a Evaluator, f64)>,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.words
            .iter()
            .filter(move |word| quality.map_or(true, |(evaluator, threshold)| evaluator.meets(word, threshold)))
            .map(DictionaryWord::canonical)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryWord> {
        self.words.iter()
    }

    /// Whether some word has this canonical form (case-insensitive).
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        let canonical = DictionaryWord::canonicalize(word);
        self.words.iter().any(|w| w.canonical == canonical)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryWord;
    type IntoIter = std::slice::Iter<'a, DictionaryWord>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}
