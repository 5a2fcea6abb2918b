//! Read cursor over a token slice
//!
//! The cursor is the only state the parsers share. It never mutates the tokens
//! and can be rewound to any earlier index.

use crate::cif::lexing::{Token, TokenSpan};

#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [TokenSpan],
    index: usize,
    /// Offset reported once every token is consumed, normally the source length
    end_offset: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [TokenSpan], end_offset: usize) -> Self {
        Self {
            tokens,
            index: 0,
            end_offset,
        }
    }

    /// Cursor whose end offset is the end of the last token
    pub fn from_tokens(tokens: &'t [TokenSpan]) -> Self {
        let end_offset = tokens.last().map(|(_, span)| span.end).unwrap_or(0);
        Self::new(tokens, end_offset)
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index).map(|(token, _)| token)
    }

    pub fn peek_with_span(&self) -> Option<&'t TokenSpan> {
        self.tokens.get(self.index)
    }

    /// Consume and return the next token
    pub fn advance(&mut self) -> Option<&'t TokenSpan> {
        let next = self.tokens.get(self.index);
        if next.is_some() {
            self.index += 1;
        }
        next
    }

    /// Index of the next token to be read
    pub fn index(&self) -> usize {
        self.index
    }

    /// Byte offset of the next token, or the end offset when exhausted
    pub fn offset(&self) -> usize {
        self.tokens
            .get(self.index)
            .map(|(_, span)| span.start)
            .unwrap_or(self.end_offset)
    }

    /// Byte offset just past the last consumed token
    pub fn consumed_end(&self) -> usize {
        match self.index {
            0 => self.offset(),
            i => self.tokens[i - 1].1.end,
        }
    }

    pub fn rewind(&mut self, index: usize) {
        self.index = index.min(self.tokens.len());
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &'t [TokenSpan] {
        &self.tokens[self.index..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cif::lexing::tokenize_with_spans;

    #[test]
    fn test_walks_tokens_and_offsets() {
        let tokens = tokenize_with_spans("_a  1").unwrap();
        let mut cursor = TokenCursor::new(&tokens, 7);

        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.peek(), Some(&Token::DataName("_a".to_string())));
        cursor.advance();
        assert_eq!(cursor.offset(), 4);
        assert_eq!(cursor.consumed_end(), 2);
        cursor.advance();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.offset(), 7);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.index(), 2);
    }

    #[test]
    fn test_rewind() {
        let tokens = tokenize_with_spans("_a 1 2").unwrap();
        let mut cursor = TokenCursor::from_tokens(&tokens);
        cursor.advance();
        cursor.advance();
        cursor.rewind(1);
        assert_eq!(cursor.remaining().len(), 2);
        cursor.rewind(99);
        assert!(cursor.is_at_end());
        assert_eq!(cursor.offset(), 6);
    }
}
