//! Lazy expansion of a parsed block sequence
//!
//! Enumeration order is fixed: within a charset block, shorter lengths come
//! before longer ones, and within a fixed length, candidates follow the
//! lexicographic order of the sorted charset (standard odometer iteration
//! with the last block varying fastest). The same block sequence always
//! expands in the same order.

use super::Block;

/// Per-block iteration state.
enum Cursor<'p> {
    Literal(&'p str),
    Charset {
        chars: &'p [char],
        lengths: &'p [usize],
        len_idx: usize,
        digits: Vec<usize>,
    },
}

impl<'p> Cursor<'p> {
    /// Build a cursor positioned at the block's first candidate, or `None`
    /// when the block contributes zero candidates (empty charset with a
    /// non-zero length requirement, or an empty length set).
    fn new(block: &'p Block) -> Option<Self> {
        match block {
            Block::Literal(text) => Some(Cursor::Literal(text)),
            Block::Charset { chars, lengths } => {
                let len_idx = first_viable_length(chars, lengths, 0)?;
                Some(Cursor::Charset {
                    chars,
                    lengths,
                    len_idx,
                    digits: vec![0; lengths[len_idx]],
                })
            }
        }
    }

    /// Append this cursor's current candidate fragment to `out`.
    fn emit(&self, out: &mut String) {
        match self {
            Cursor::Literal(text) => out.push_str(text),
            Cursor::Charset { chars, digits, .. } => {
                for &d in digits {
                    out.push(chars[d]);
                }
            }
        }
    }

    /// Step to the next candidate fragment. Returns `true` when the cursor
    /// wrapped back to its first fragment (the carry for the odometer).
    fn advance(&mut self) -> bool {
        match self {
            Cursor::Literal(_) => true,
            Cursor::Charset {
                chars,
                lengths,
                len_idx,
                digits,
            } => {
                for d in digits.iter_mut().rev() {
                    *d += 1;
                    if *d < chars.len() {
                        return false;
                    }
                    *d = 0;
                }
                // Every position wrapped (or the length was zero): move on
                // to the next admissible length.
                match first_viable_length(chars, lengths, *len_idx + 1) {
                    Some(next) => {
                        *len_idx = next;
                        *digits = vec![0; lengths[next]];
                        false
                    }
                    None => {
                        // Cursor::new succeeded, so a viable length exists.
                        let first = first_viable_length(chars, lengths, 0)
                            .unwrap_or(0);
                        *len_idx = first;
                        *digits = vec![0; lengths[first]];
                        true
                    }
                }
            }
        }
    }
}

/// Index of the first length at or after `from` that yields at least one
/// candidate. Length zero always yields the empty fragment; longer lengths
/// need a non-empty charset.
fn first_viable_length(chars: &[char], lengths: &[usize], from: usize) -> Option<usize> {
    (from..lengths.len()).find(|&i| lengths[i] == 0 || !chars.is_empty())
}

/// Lazy iterator over every candidate implied by a block sequence.
///
/// An empty block sequence yields exactly one empty string. A block with an
/// empty charset (or an empty length set) prunes the whole expansion to zero
/// candidates rather than contributing a blank slot.
pub struct Expansion<'p> {
    cursors: Vec<Cursor<'p>>,
    done: bool,
}

impl<'p> Expansion<'p> {
    pub(crate) fn new(blocks: &'p [Block]) -> Self {
        let mut cursors = Vec::with_capacity(blocks.len());
        for block in blocks {
            match Cursor::new(block) {
                Some(cursor) => cursors.push(cursor),
                None => {
                    return Self {
                        cursors: Vec::new(),
                        done: true,
                    }
                }
            }
        }
        Self {
            cursors,
            done: false,
        }
    }
}

impl Iterator for Expansion<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut candidate = String::new();
        for cursor in &self.cursors {
            cursor.emit(&mut candidate);
        }

        // Odometer increment, last block fastest; when the leftmost cursor
        // wraps the sequence is exhausted.
        let mut wrapped = true;
        for cursor in self.cursors.iter_mut().rev() {
            if !cursor.advance() {
                wrapped = false;
                break;
            }
        }
        if wrapped {
            self.done = true;
        }

        Some(candidate)
    }
}

/// Total number of candidates a block sequence expands to, saturating at
/// `u128::MAX`. Patterns can be combinatorially explosive; callers should
/// consult this before materializing anything.
pub(crate) fn cardinality(blocks: &[Block]) -> u128 {
    let mut total: u128 = 1;
    for block in blocks {
        let block_count = match block {
            Block::Literal(_) => 1,
            Block::Charset { chars, lengths } => lengths
                .iter()
                .map(|&len| match (chars.len(), len) {
                    (_, 0) => 1,
                    (0, _) => 0,
                    (base, _) => (base as u128)
                        .checked_pow(len as u32)
                        .unwrap_or(u128::MAX),
                })
                .fold(0u128, u128::saturating_add),
        };
        total = total.saturating_mul(block_count);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn charset(chars: &[char], lengths: &[usize]) -> Block {
        Block::Charset {
            chars: chars.to_vec(),
            lengths: lengths.to_vec(),
        }
    }

    fn expand_all(blocks: &[Block]) -> Vec<String> {
        Expansion::new(blocks).collect()
    }

    #[test]
    fn test_no_blocks_yield_single_empty_string() {
        assert_eq!(expand_all(&[]), vec![String::new()]);
    }

    #[test]
    fn test_single_literal_passes_through() {
        let blocks = [Block::Literal("john".into())];
        assert_eq!(expand_all(&blocks), vec!["john"]);
    }

    #[test]
    fn test_charset_enumerates_in_sorted_order() {
        let blocks = [charset(&['a', 'b', 'c'], &[1])];
        assert_eq!(expand_all(&blocks), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_last_block_varies_fastest() {
        let blocks = [charset(&['a', 'b'], &[1]), charset(&['0', '1'], &[1])];
        assert_eq!(expand_all(&blocks), vec!["a0", "a1", "b0", "b1"]);
    }

    #[test]
    fn test_shorter_lengths_come_first() {
        let blocks = [charset(&['a', 'b'], &[1, 2])];
        assert_eq!(
            expand_all(&blocks),
            vec!["a", "b", "aa", "ab", "ba", "bb"]
        );
    }

    #[test]
    fn test_length_zero_contributes_empty_fragment() {
        let blocks = [Block::Literal("x".into()), charset(&['a'], &[0, 1])];
        assert_eq!(expand_all(&blocks), vec!["x", "xa"]);
    }

    #[test]
    fn test_empty_charset_prunes_whole_expansion() {
        let blocks = [Block::Literal("john".into()), charset(&[], &[1])];
        assert!(expand_all(&blocks).is_empty());
    }

    #[test]
    fn test_empty_length_set_prunes_whole_expansion() {
        let blocks = [Block::Literal("john".into()), charset(&['a'], &[])];
        assert!(expand_all(&blocks).is_empty());
    }

    #[test]
    fn test_empty_charset_with_length_zero_still_yields() {
        // Length 0 asks for zero draws, so an empty charset is fine there.
        let blocks = [Block::Literal("x".into()), charset(&[], &[0, 3])];
        assert_eq!(expand_all(&blocks), vec!["x"]);
    }

    #[test]
    fn test_expansion_is_restartable_and_deterministic() {
        let blocks = [charset(&['a', 'b'], &[1, 2]), charset(&['0', '1'], &[1])];
        let first: Vec<String> = Expansion::new(&blocks).collect();
        let second: Vec<String> = Expansion::new(&blocks).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cardinality_matches_materialized_count() {
        let cases: Vec<Vec<Block>> = vec![
            vec![],
            vec![Block::Literal("john".into())],
            vec![charset(&['0', '1', '2'], &[1, 2])],
            vec![Block::Literal("x".into()), charset(&['a', 'b'], &[0, 1, 2])],
            vec![charset(&[], &[1])],
            vec![charset(&['a'], &[])],
        ];
        for blocks in &cases {
            assert_eq!(
                cardinality(blocks),
                expand_all(blocks).len() as u128,
                "cardinality mismatch for {blocks:?}"
            );
        }
    }

    #[test]
    fn test_cardinality_saturates_instead_of_overflowing() {
        let blocks = [charset(&['a', 'b'], &[200]), charset(&['a', 'b'], &[200])];
        assert_eq!(cardinality(&blocks), u128::MAX);
    }
}
