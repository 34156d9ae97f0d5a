//! Query templates: a letter specification split into fixed letters and unknown positions.
//!
//! Grammar (whitespace is removed first, case is ignored):
//!
//! | Token   | Meaning                                    |
//! |---------|--------------------------------------------|
//! | `A`-`Z` | a known letter                             |
//! | `?` `_` `.` | one blank: any letter of the alphabet  |
//! | `[DEF]` | one position restricted to D, E or F       |
//!
//! Accented letters fold to their base letter (`é` is `E`). Any other character is
//! dropped with a warning, as is a pool member that folds to several letters (`æ`). Known letters and unknown pools are each kept in encounter
//! order, but candidates always put the known letters first: fingerprints ignore order,
//! so the original interleaving is not needed for anagram lookup.

use crate::alphabet::{fold_char, AnagramChar, ALPHABET, POOL_CLOSE, POOL_OPEN};
use crate::errors::ParseError;
use itertools::{Either, Itertools};
use log::warn;
use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{anychar, char, satisfy},
    combinator::map,
    error::{ErrorKind, ParseError as NomParseError},
    IResult, Offset, Parser,
};
use std::fmt;
use std::str::FromStr;

/// Fixed letters plus the letter sets of the unknown positions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryTemplate {
    known: String,
    unknown_pools: Vec<Vec<char>>,
}

impl QueryTemplate {
    /// Parse a raw letter specification.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for unterminated, nested, empty or unopened pools.
    pub fn create(spec: &str) -> Result<Self, ParseError> {
        spec.parse()
    }

    /// The fixed letters, uppercase, in encounter order.
    #[must_use]
    pub fn known(&self) -> &str {
        &self.known
    }

    /// One letter set per unknown position, in encounter order.
    #[must_use]
    pub fn unknown_pools(&self) -> &[Vec<char>] {
        &self.unknown_pools
    }

    /// Number of positions: known letters plus unknown pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.chars().count() + self.unknown_pools.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unknown_pools.is_empty()
    }

    /// Product of the pool sizes (1 with no pools), saturating at `u128::MAX`.
    #[must_use]
    pub fn count_unknown_combos(&self) -> u128 {
        self.unknown_pools
            .iter()
            .fold(1u128, |acc, pool| acc.saturating_mul(pool.len() as u128))
    }

    /// Every concrete letter sequence: the known letters followed by one choice per pool.
    ///
    /// Choices follow pool order, last pool varying fastest. Each call starts afresh.
    pub fn iterate_possibles(&self) -> impl Iterator<Item = String> + '_ {
        if self.unknown_pools.is_empty() {
            return Either::Left(std::iter::once(self.known.clone()));
        }
        Either::Right(
            self.unknown_pools
                .iter()
                .map(|pool| pool.iter().copied())
                .multi_cartesian_product()
                .map(move |choice| {
                    let mut candidate = String::with_capacity(self.known.len() + choice.len());
                    candidate.push_str(&self.known);
                    candidate.extend(choice);
                    candidate
                }),
        )
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.known)?;
        for pool in &self.unknown_pools {
            if pool.iter().copied().eq(ALPHABET.chars()) {
                f.write_str("?")?;
            } else {
                write!(f, "[{}]", pool.iter().collect::<String>())?;
            }
        }
        Ok(())
    }
}

impl FromStr for QueryTemplate {
    type Err = ParseError;

    /// Walks the cleaned input, consuming tokens one at a time with `spec_token`.
    fn from_str(raw_spec: &str) -> Result<Self, Self::Err> {
        let spec: String = raw_spec.chars().filter(|c| !c.is_whitespace()).collect();
        let mut template = QueryTemplate::default();
        let mut rest = spec.as_str();

        while !rest.is_empty() {
            match spec_token(rest) {
                Ok((next, token)) => {
                    template.push(token, &spec, spec.offset(rest))?;
                    rest = next;
                }
                Err(nom::Err::Failure(failure) | nom::Err::Error(failure)) => {
                    return Err(failure.into_parse_error(&spec));
                }
                Err(nom::Err::Incomplete(_)) => {
                    return Err(ParseError::UnterminatedPool { spec: spec.clone(), position: char_position(&spec, spec.offset(rest)) });
                }
            }
        }

        Ok(template)
    }
}

impl QueryTemplate {
    fn push(&mut self, token: Token<'_>, spec: &str, offset: usize) -> Result<(), ParseError> {
        match token {
            Token::Blank => self.unknown_pools.push(ALPHABET.chars().collect()),
            Token::Pool(members) => {
                let mut pool = Vec::with_capacity(members.len());
                for c in members.chars() {
                    // A pool member stands for one position, so it must fold to one letter
                    match fold_char(c).exactly_one() {
                        Ok(letter) => pool.push(letter),
                        Err(_) => warn!(
                            "dropping '{c}' from letter pool at position {} of \"{spec}\"",
                            char_position(spec, offset)
                        ),
                    }
                }
                if pool.is_empty() {
                    return Err(ParseError::EmptyPool { spec: spec.to_string(), position: char_position(spec, offset) });
                }
                self.unknown_pools.push(pool);
            }
            Token::Other(c) => {
                let before = self.known.len();
                self.known.extend(fold_char(c));
                if self.known.len() == before {
                    warn!("dropping unrecognized character '{c}' at position {} of \"{spec}\"", char_position(spec, offset));
                }
            }
        }
        Ok(())
    }
}

fn char_position(spec: &str, byte_offset: usize) -> usize {
    spec[..byte_offset].chars().count()
}

// === Token parsers ===

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Blank,
    Pool(&'a str),
    Other(char),
}

/// Failures carry the remaining input at the point of failure.
#[derive(Debug, PartialEq)]
enum TokenFailure<'a> {
    Unterminated(&'a str),
    Nested(&'a str),
    Empty(&'a str),
    StrayClose(&'a str),
    Nom(&'a str, ErrorKind),
}

impl TokenFailure<'_> {
    fn into_parse_error(self, spec: &str) -> ParseError {
        let at = |rest: &str| char_position(spec, spec.offset(rest));
        let spec_owned = spec.to_string();
        match self {
            TokenFailure::Unterminated(rest) | TokenFailure::Nom(rest, _) => ParseError::UnterminatedPool { position: at(rest), spec: spec_owned },
            TokenFailure::Nested(rest) => ParseError::NestedPool { position: at(rest), spec: spec_owned },
            TokenFailure::Empty(rest) => ParseError::EmptyPool { position: at(rest), spec: spec_owned },
            TokenFailure::StrayClose(rest) => ParseError::UnmatchedPoolClose { position: at(rest), spec: spec_owned },
        }
    }
}

impl<'a> NomParseError<&'a str> for TokenFailure<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        TokenFailure::Nom(input, kind)
    }

    fn append(_input: &'a str, _kind: ErrorKind, other: Self) -> Self {
        other
    }
}

type PResult<'a, O> = IResult<&'a str, O, TokenFailure<'a>>;

fn blank(input: &str) -> PResult<'_, Token<'_>> {
    map(satisfy(|c| c.is_blank_marker()), |_| Token::Blank).parse(input)
}

fn pool(input: &str) -> PResult<'_, Token<'_>> {
    let (body_start, _) = char(POOL_OPEN).parse(input)?;
    let (rest, members) = take_till(|c: char| c.is_pool_open() || c.is_pool_close()).parse(body_start)?;
    match rest.chars().next() {
        Some(POOL_CLOSE) if members.is_empty() => Err(nom::Err::Failure(TokenFailure::Empty(input))),
        Some(POOL_CLOSE) => Ok((&rest[POOL_CLOSE.len_utf8()..], Token::Pool(members))),
        Some(_) => Err(nom::Err::Failure(TokenFailure::Nested(rest))),
        None => Err(nom::Err::Failure(TokenFailure::Unterminated(input))),
    }
}

fn stray_close(input: &str) -> PResult<'_, Token<'_>> {
    let _ = char(POOL_CLOSE).parse(input)?;
    Err(nom::Err::Failure(TokenFailure::StrayClose(input)))
}

fn other(input: &str) -> PResult<'_, Token<'_>> {
    map(anychar, Token::Other).parse(input)
}

fn spec_token(input: &str) -> PResult<'_, Token<'_>> {
    alt((blank, pool, stray_close, other)).parse(input)
}
