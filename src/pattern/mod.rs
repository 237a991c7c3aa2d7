//! Pattern expansion for usernames and email local-parts
//!
//! A compact bracket/length syntax describes a family of candidate
//! identifiers:
//!
//! - `[<chars>]`: character set (e.g. `[a-z]`, `[0-9]`, `[abc]`)
//! - `[<chars>]{<lens>}`: character set with repeat lengths
//!   (e.g. `[0-9]{1;2}` for one or two digits, `{1-3}` for one to three)
//! - escaping: `\[`, `\]`, `\\` for literal brackets and backslash
//!
//! Examples:
//!
//! ```text
//! john[a-z]       -> johna, johnb, ... johnz
//! user[0-9]{1-2}  -> user0, user1, ... user99
//! john\.doe[0-9]  -> john.doe0, john.doe1, ...
//! ```
//!
//! The engine is synchronous and free of I/O; parsing and expansion touch
//! only local state, so independent invocations are safe from any number of
//! threads.

mod expand;
mod lexer;
mod parser;

pub use expand::Expansion;

use rand::seq::SliceRandom;

use crate::error::Result;

/// One segment of a parsed pattern: either literal text or a charset with
/// its admissible repeat lengths.
///
/// Charset members are deduplicated and sorted; so are lengths. A parsed
/// sequence never holds two adjacent `Literal` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Literal(String),
    Charset {
        chars: Vec<char>,
        lengths: Vec<usize>,
    },
}

/// A parsed, immutable pattern. Built once per input string and discarded
/// after expansion; carries no identity beyond structural equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    blocks: Vec<Block>,
}

impl Pattern {
    /// Parse a pattern string. All syntax errors surface here, before any
    /// expansion begins, so a pattern can be validated cheaply.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self {
            blocks: parser::parse_blocks(input)?,
        })
    }

    /// The parsed block sequence, in source order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Lazily enumerate every candidate string, in deterministic order:
    /// ascending length within a block, lexicographic within a length, last
    /// block varying fastest. Restartable: repeated calls yield identical
    /// sequences. Stopping consumption early is always safe; every candidate
    /// produced is complete.
    pub fn candidates(&self) -> Expansion<'_> {
        Expansion::new(&self.blocks)
    }

    /// Total candidate count, saturating at `u128::MAX`. Cheap; use it to
    /// impose caps before materializing anything.
    pub fn cardinality(&self) -> u128 {
        expand::cardinality(&self.blocks)
    }
}

/// Expand a pattern into the full candidate list, in deterministic order.
///
/// This materializes the whole set; for combinatorially large patterns
/// prefer [`Pattern::candidates`] and stop consuming at a cap.
pub fn expand(pattern: &str) -> Result<Vec<String>> {
    Ok(Pattern::parse(pattern)?.candidates().collect())
}

/// Expand a pattern into the same candidate set as [`expand`], shuffled.
///
/// Useful to avoid a predictable, sequential probe order that target sites
/// can rate-limit or fingerprint. No ordering guarantee beyond being a
/// permutation of the deterministic output.
pub fn expand_random(pattern: &str) -> Result<Vec<String>> {
    let mut candidates = expand(pattern)?;
    candidates.shuffle(&mut rand::thread_rng());
    Ok(candidates)
}
