//! Parsers for the bracket/length pattern grammar
//!
//! The top-level parser walks the whole input and produces the ordered
//! [`Block`] sequence; the charset and length-set parsers are entered just
//! after an opening `[` / `{` and consume through the matching closer.

use std::collections::BTreeSet;

use super::lexer::Lexer;
use super::Block;
use crate::error::{Result, UserScoutError};

/// Parse a full pattern string into its block sequence.
///
/// Escape policy: `\X` always emits the literal character `X` (the backslash
/// is dropped), whether or not `X` is special. A trailing `\` with nothing
/// after it is a syntax error.
pub(crate) fn parse_blocks(input: &str) -> Result<Vec<Block>> {
    let mut lexer = Lexer::new(input);
    let mut blocks = Vec::new();

    while let Some(c) = lexer.advance() {
        match c {
            '\\' => {
                let escaped = lexer.advance().ok_or_else(|| {
                    UserScoutError::pattern_syntax("dangling escape: '\\' at end of pattern")
                })?;
                push_literal(&mut blocks, escaped);
            }
            '[' => {
                let chars = parse_charset(&mut lexer)?;
                let lengths = if lexer.peek() == Some('{') {
                    lexer.advance();
                    parse_length_set(&mut lexer)?
                } else {
                    vec![1]
                };
                blocks.push(Block::Charset { chars, lengths });
            }
            ']' => {
                return Err(UserScoutError::pattern_syntax(
                    "invalid unescaped ']' in pattern",
                ))
            }
            other => push_literal(&mut blocks, other),
        }
    }

    Ok(blocks)
}

/// Append a character to the trailing literal block, coalescing runs of
/// plain text into a single block.
fn push_literal(blocks: &mut Vec<Block>, c: char) {
    if let Some(Block::Literal(text)) = blocks.last_mut() {
        text.push(c);
    } else {
        blocks.push(Block::Literal(c.to_string()));
    }
}

/// Parse a `[...]` character set. The lexer is positioned just after the
/// opening `[`; the closing `]` is consumed. Duplicates merge silently and
/// the result comes back sorted for deterministic iteration.
fn parse_charset(lexer: &mut Lexer) -> Result<Vec<char>> {
    let mut set = BTreeSet::new();

    loop {
        match lexer.advance() {
            None => {
                return Err(UserScoutError::pattern_syntax(
                    "missing ']' at the end of pattern",
                ))
            }
            Some(']') => break,
            Some('\\') => {
                let escaped = lexer.advance().ok_or_else(|| {
                    UserScoutError::pattern_syntax(
                        "dangling escape: '\\' at end of character set",
                    )
                })?;
                set.insert(escaped);
            }
            // A '-' that cannot be the left side of a range is literal.
            Some('-') => {
                set.insert('-');
            }
            Some(start) => {
                if lexer.peek() == Some('-') {
                    lexer.advance();
                    let end = lexer.advance().ok_or_else(|| {
                        UserScoutError::pattern_syntax(
                            "unterminated range in character set",
                        )
                    })?;
                    // Inclusive code-point range; a reversed range is empty.
                    for cp in (start as u32)..=(end as u32) {
                        if let Some(c) = char::from_u32(cp) {
                            set.insert(c);
                        }
                    }
                } else {
                    set.insert(start);
                }
            }
        }
    }

    Ok(set.into_iter().collect())
}

/// Parse a `{...}` length set. The lexer is positioned just after the
/// opening `{`; the closing `}` is consumed.
///
/// Accepts bare integers, `N-M` closed ranges, and `;` separators. A `-`
/// with no bound on either side is a syntax error; a reversed range (`5-2`)
/// contributes nothing.
fn parse_length_set(lexer: &mut Lexer) -> Result<Vec<usize>> {
    let mut set = BTreeSet::new();

    loop {
        match lexer.peek() {
            None => {
                return Err(UserScoutError::pattern_syntax(
                    "missing '}' at the end of pattern",
                ))
            }
            Some('}') => {
                lexer.advance();
                break;
            }
            Some(';') => {
                lexer.advance();
            }
            Some('-') => {
                return Err(UserScoutError::pattern_syntax(
                    "'-' with no lower bound in length set",
                ))
            }
            Some(c) if c.is_ascii_digit() => {
                let Some(lo) = lexer.parse_integer() else {
                    return Err(UserScoutError::pattern_syntax(
                        "invalid length set in pattern",
                    ));
                };
                if lexer.peek() == Some('-') {
                    lexer.advance();
                    let hi = lexer.parse_integer().ok_or_else(|| {
                        UserScoutError::pattern_syntax(
                            "missing upper bound after '-' in length set",
                        )
                    })?;
                    for n in lo..=hi {
                        set.insert(n);
                    }
                } else {
                    set.insert(lo);
                }
            }
            Some(c) => {
                return Err(UserScoutError::pattern_syntax(format!(
                    "invalid character {c:?} in length set"
                )))
            }
        }
    }

    Ok(set.into_iter().collect())
}
