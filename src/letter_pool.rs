//! A pool of letter tiles for working out an anagram by hand.
//!
//! The pool tracks which letters have been played, covers missing letters with blanks
//! (`_` when building), and reports "strangers": letters played that neither the pool nor
//! a blank could supply.

use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::fmt;

/// Marks a blank tile when building a pool.
pub const BLANK: char = '_';
/// How a blank is shown by [`LetterPool::render`].
pub const RENDERED_BLANK: char = '?';

/// What happens to a stranger letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolMode {
    /// Strangers are reported and not recorded as used.
    #[default]
    Strict,
    /// Strangers are reported and still recorded as used.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPool {
    letters: Vec<char>,
    original_blanks: usize,
    blanks: usize,
    used: Vec<char>,
    mode: PoolMode,
}

impl LetterPool {
    /// Upper-case `token`, drop whitespace, and count `_` as blanks.
    #[must_use]
    pub fn build(token: &str) -> Self {
        let mut letters = Vec::new();
        let mut blanks = 0;
        for c in token.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase) {
            if c == BLANK {
                blanks += 1;
            } else {
                letters.push(c);
            }
        }
        LetterPool { letters, original_blanks: blanks, blanks, used: Vec::new(), mode: PoolMode::default() }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: PoolMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    /// All letters, in display order.
    #[must_use]
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Blanks not yet spent.
    #[must_use]
    pub fn blanks(&self) -> usize {
        self.blanks
    }

    /// Letters played so far, in order.
    #[must_use]
    pub fn used(&self) -> &[char] {
        &self.used
    }

    /// Letters not yet played, in display order.
    #[must_use]
    pub fn unused(&self) -> Vec<char> {
        let mut unused = self.letters.clone();
        for played in &self.used {
            if let Some(pos) = unused.iter().position(|c| c == played) {
                unused.remove(pos);
            }
        }
        unused
    }

    /// Unused letters separated by spaces, then one `?` per remaining blank.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = self.unused().iter().map(char::to_string).collect::<Vec<_>>().join(" ");
        if self.blanks > 0 {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            rendered.extend(std::iter::repeat(RENDERED_BLANK).take(self.blanks));
        }
        rendered
    }

    /// Play each non-whitespace char of `chars`; returns the strangers.
    ///
    /// A letter missing from the unused letters spends a blank. With no blank left it is a
    /// stranger, recorded as used only in [`PoolMode::Lenient`].
    pub fn consume(&mut self, chars: &str) -> Vec<char> {
        let mut strangers = Vec::new();
        for c in chars.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_uppercase) {
            let mut strange = false;
            if !self.unused().contains(&c) {
                if self.blanks > 0 {
                    self.blanks -= 1;
                } else {
                    strange = true;
                    strangers.push(c);
                }
            }
            if !strange || self.mode == PoolMode::Lenient {
                self.used.push(c);
            }
        }
        if !strangers.is_empty() {
            info!("\"used\" letters not in pool: {strangers:?}");
        }
        strangers
    }

    /// Forget every play and restore the blanks.
    pub fn reset(&mut self) {
        self.used.clear();
        self.blanks = self.original_blanks;
    }

    /// Reorder the letters at random.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.letters.shuffle(rng);
    }

    /// Put the letters in alphabetical order.
    pub fn alphabetize(&mut self) {
        self.letters.sort_unstable();
    }

    /// Up to `n` distinct random orderings of the unused letters, first-seen order.
    ///
    /// Fewer than `n` come back when the letters allow fewer distinct orderings or the
    /// draws repeat.
    pub fn shuffled_variants<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<String> {
        let mut unused = self.unused();
        let mut seen = FxHashSet::default();
        let mut variants = Vec::new();
        for _ in 0..n {
            unused.shuffle(rng);
            let variant: String = unused.iter().collect();
            if seen.insert(variant.clone()) {
                variants.push(variant);
            }
        }
        variants
    }
}

impl fmt::Display for LetterPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub const CMD_LAST: &str = "/";
pub const CMD_EXIT: &str = "/EXIT";
pub const CMD_RESET: &str = "/RESET";
pub const CMD_SHUFFLE: &str = "/SHUFFLE";
pub const CMD_ALPHABETIZE: &str = "/ALPHABETIZE";

/// Commands suggested to a user who enters nothing.
pub const SAMPLE_COMMANDS: [&str; 3] = ["/shuffle", "/alphabetize", "/exit"];

fn alias(cmd: &str) -> &str {
    match cmd {
        "/LAST" => CMD_LAST,
        "/QUIT" => CMD_EXIT,
        "/ALPHA" | "/A" => CMD_ALPHABETIZE,
        "/S" => CMD_SHUFFLE,
        other => other,
    }
}

/// Split an entry into an upper-cased, de-aliased command word and its parameters.
///
/// Entries not starting with `/` are upper-cased whole and carry no parameters.
#[must_use]
pub fn normalize_cmd(entry: &str) -> (String, Vec<String>) {
    let entry = entry.trim();
    let (cmd, params) = if entry.starts_with('/') {
        let mut parts = entry.split_whitespace();
        let cmd = parts.next().unwrap_or(CMD_LAST);
        (cmd, parts.map(str::to_string).collect())
    } else {
        (entry, Vec::new())
    };
    (alias(&cmd.to_uppercase()).to_string(), params)
}

/// One line of input to the pool REPL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Repeat the previous command.
    Last,
    Exit,
    Reset,
    /// Shuffle in place, or list this many shuffled variants.
    Shuffle(Option<usize>),
    Alphabetize,
    /// A bare `_`; playing a blank directly is not supported.
    Blank,
    /// Letters to play.
    Consume(String),
    /// A `/` command nobody knows.
    Unrecognized(String),
    /// A known command with a parameter it cannot use.
    BadParameter { command: String, param: String },
    Empty,
}

impl Command {
    #[must_use]
    pub fn parse(entry: &str) -> Self {
        let (cmd, params) = normalize_cmd(entry);
        match cmd.as_str() {
            "" => Command::Empty,
            CMD_LAST => Command::Last,
            CMD_EXIT => Command::Exit,
            CMD_RESET => Command::Reset,
            CMD_ALPHABETIZE => Command::Alphabetize,
            CMD_SHUFFLE => match params.first() {
                None => Command::Shuffle(None),
                Some(param) => match param.parse() {
                    Ok(n) => Command::Shuffle(Some(n)),
                    Err(_) => Command::BadParameter { command: cmd, param: param.clone() },
                },
            },
            "_" => Command::Blank,
            _ if cmd.starts_with('/') => Command::Unrecognized(cmd),
            _ => Command::Consume(cmd),
        }
    }

    /// Resolves [`Command::Last`] to `previous`, or to [`Command::Empty`] when there is
    /// nothing to repeat. Every other command is returned unchanged.
    #[must_use]
    pub fn or_previous(self, previous: Option<&Command>) -> Command {
        match self {
            Command::Last => previous.cloned().unwrap_or(Command::Empty),
            command => command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_build() {
        let pool = LetterPool::build("ab c_d _");
        assert_eq!(pool.letters(), &['A', 'B', 'C', 'D']);
        assert_eq!(pool.blanks(), 2);
        assert_eq!(pool.render(), "A B C D ??");
        assert_eq!(pool.to_string(), "A B C D ??");
        assert_eq!(LetterPool::build("xy").render(), "X Y");
        assert_eq!(LetterPool::build("__").render(), "??");
    }

    #[test]
    fn test_consume_from_pool() {
        let mut pool = LetterPool::build("LISTEN");
        assert!(pool.consume("si").is_empty());
        assert_eq!(pool.used(), &['S', 'I']);
        assert_eq!(pool.unused(), vec!['L', 'T', 'E', 'N']);
        assert_eq!(pool.render(), "L T E N");
    }

    #[test]
    fn test_consume_spends_blanks_then_reports_strangers() {
        let mut pool = LetterPool::build("AB_");
        assert!(pool.consume("AZ").is_empty());
        assert_eq!(pool.blanks(), 0);
        assert_eq!(pool.used(), &['A', 'Z']);

        // a second A is not in the unused letters and no blank is left
        assert_eq!(pool.consume("A Q"), vec!['A', 'Q']);
        assert_eq!(pool.used(), &['A', 'Z']);
        assert_eq!(pool.render(), "B");
    }

    #[test]
    fn test_lenient_mode_records_strangers() {
        let mut pool = LetterPool::build("AB").with_mode(PoolMode::Lenient);
        assert_eq!(pool.mode(), PoolMode::Lenient);
        assert_eq!(pool.consume("AX"), vec!['X']);
        assert_eq!(pool.used(), &['A', 'X']);
        assert_eq!(pool.unused(), vec!['B']);
    }

    #[test]
    fn test_reset() {
        let mut pool = LetterPool::build("CAT_");
        pool.consume("CAR");
        assert_eq!(pool.blanks(), 0);
        pool.reset();
        assert!(pool.used().is_empty());
        assert_eq!(pool.blanks(), 1);
        assert_eq!(pool.render(), "C A T ?");
    }

    #[test]
    fn test_alphabetize() {
        let mut pool = LetterPool::build("TEAM");
        pool.alphabetize();
        assert_eq!(pool.letters(), &['A', 'E', 'M', 'T']);
    }

    #[test]
    fn test_shuffle_keeps_letters() {
        let mut pool = LetterPool::build("ANAGRAM");
        let mut rng = StdRng::seed_from_u64(7);
        pool.shuffle(&mut rng);
        let mut sorted = pool.letters().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec!['A', 'A', 'A', 'G', 'M', 'N', 'R']);
    }

    #[test]
    fn test_shuffled_variants_are_distinct_and_bounded() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut pool = LetterPool::build("ABC");
        let variants = pool.shuffled_variants(100, &mut rng);
        assert_eq!(variants.len(), 6);
        assert_eq!(variants.iter().collect::<FxHashSet<_>>().len(), 6);

        pool.consume("A");
        for variant in pool.shuffled_variants(10, &mut rng) {
            assert_eq!(variant.len(), 2);
            assert!(!variant.contains('A'));
        }

        assert_eq!(LetterPool::build("AA").shuffled_variants(5, &mut rng), vec!["AA"]);
        assert!(LetterPool::build("AB").shuffled_variants(0, &mut rng).is_empty());
    }

    #[test]
    fn test_normalize_cmd() {
        assert_eq!(normalize_cmd("/shuffle 3"), ("/SHUFFLE".to_string(), vec!["3".to_string()]));
        assert_eq!(normalize_cmd("/quit").0, CMD_EXIT);
        assert_eq!(normalize_cmd("/last").0, CMD_LAST);
        assert_eq!(normalize_cmd("/a").0, CMD_ALPHABETIZE);
        assert_eq!(normalize_cmd("/Alpha").0, CMD_ALPHABETIZE);
        assert_eq!(normalize_cmd("tea"), ("TEA".to_string(), vec![]));
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("/"), Command::Last);
        assert_eq!(Command::parse("/exit"), Command::Exit);
        assert_eq!(Command::parse("/reset"), Command::Reset);
        assert_eq!(Command::parse("/s"), Command::Shuffle(None));
        assert_eq!(Command::parse("/shuffle 4"), Command::Shuffle(Some(4)));
        assert_eq!(
            Command::parse("/s lots"),
            Command::BadParameter { command: CMD_SHUFFLE.to_string(), param: "lots".to_string() }
        );
        assert_eq!(Command::parse("/A"), Command::Alphabetize);
        assert_eq!(Command::parse("_"), Command::Blank);
        assert_eq!(Command::parse("/dance"), Command::Unrecognized("/DANCE".to_string()));
        assert_eq!(Command::parse("ten"), Command::Consume("TEN".to_string()));
        assert_eq!(Command::parse("  "), Command::Empty);
    }

    #[test]
    fn test_last_repeats_previous_command() {
        let previous = Command::Shuffle(Some(3));
        assert_eq!(Command::Last.or_previous(Some(&previous)), previous);
        assert_eq!(Command::Last.or_previous(None), Command::Empty);
        assert_eq!(Command::Reset.or_previous(Some(&previous)), Command::Reset);
        assert_eq!(Command::parse("ten").or_previous(None), Command::Consume("TEN".to_string()));
    }
}
