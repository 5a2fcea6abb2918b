//! Implementation of the lexer
//!
//! This module provides convenience functions for tokenizing source text.
//! The actual tokenization is handled entirely by logos.

use crate::cif::error::LexError;
use crate::cif::lexing::tokens::Token;
use crate::cif::lexing::TokenSpan;
use logos::Logos;

/// Tokenize a string and collect all tokens, dropping spans
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Ok(tokenize_with_spans(source)?
        .into_iter()
        .map(|(token, _)| token)
        .collect())
}

/// Tokenize a string and collect tokens with their byte spans
///
/// Stops at the first input logos cannot match.
pub fn tokenize_with_spans(source: &str) -> Result<Vec<TokenSpan>, LexError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let err = LexError {
                    offset: span.start,
                    text: lexer.slice().to_string(),
                };
                tracing::debug!(offset = err.offset, text = %err.text, "lexing failed");
                return Err(err);
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("loop_ _a 1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Loop,
                Token::DataName("_a".to_string()),
                Token::Bare("1".to_string())
            ]
        );
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "loop_\n  _a\n  12";
        let tokens = tokenize_with_spans(source).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].1, 0..5);
        assert_eq!(&source[tokens[1].1.clone()], "_a");
        assert_eq!(&source[tokens[2].1.clone()], "12");
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("  \n\t ").unwrap(), vec![]);
    }

    #[test]
    fn test_error_reports_offset() {
        let err = tokenize_with_spans("_a 1\n;text").unwrap_err();
        assert_eq!(err.offset, 5);
        assert!(err.text.starts_with(';'));
    }
}
