//! Character-level lexer for pattern strings

/// Single-character token stream with one character of lookahead.
///
/// The input is consumed strictly left to right; there is no backtracking.
pub(crate) struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Next unconsumed character, without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consume and return the next character.
    pub(crate) fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Greedily consume a maximal run of ASCII digits and fold it into a
    /// non-negative integer. Consumes nothing and returns `None` when the
    /// next character is not a digit.
    pub(crate) fn parse_integer(&mut self) -> Option<usize> {
        let mut value: Option<usize> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            value = Some(value.unwrap_or(0) * 10 + d as usize);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let lexer = Lexer::new("ab");
        assert_eq!(lexer.peek(), Some('a'));
        assert_eq!(lexer.peek(), Some('a'));
    }

    #[test]
    fn test_advance_consumes_left_to_right() {
        let mut lexer = Lexer::new("ab");
        assert_eq!(lexer.advance(), Some('a'));
        assert_eq!(lexer.advance(), Some('b'));
        assert_eq!(lexer.advance(), None);
        assert_eq!(lexer.peek(), None);
    }

    #[test]
    fn test_parse_integer_folds_digit_run() {
        let mut lexer = Lexer::new("123abc");
        assert_eq!(lexer.parse_integer(), Some(123));
        assert_eq!(lexer.peek(), Some('a'));
    }

    #[test]
    fn test_parse_integer_non_digit_consumes_nothing() {
        let mut lexer = Lexer::new("x12");
        assert_eq!(lexer.parse_integer(), None);
        assert_eq!(lexer.peek(), Some('x'));
    }

    #[test]
    fn test_parse_integer_leading_zeros() {
        let mut lexer = Lexer::new("007");
        assert_eq!(lexer.parse_integer(), Some(7));
        assert_eq!(lexer.peek(), None);
    }

    #[test]
    fn test_parse_integer_single_zero() {
        let mut lexer = Lexer::new("0}");
        assert_eq!(lexer.parse_integer(), Some(0));
        assert_eq!(lexer.peek(), Some('}'));
    }
}
