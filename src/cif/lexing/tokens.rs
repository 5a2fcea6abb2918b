//! Token definitions for CIF-style data files
//!
//! This module defines all the tokens that can be produced by the lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! Reserved words (`loop_`, `data_`, `save_`) are matched case-insensitively and
//! only as whole tokens, so `loops` or `loop_x` lex as ordinary bare values.
use logos::Logos;

use crate::cif::ast::{Quoting, Value};

/// All possible tokens in a CIF-style source
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Block and loop markers
    #[regex("[lL][oO][oO][pP]_")]
    Loop,
    #[regex(r"[dD][aA][tT][aA]_[^ \t\r\n\f]+", |lex| lex.slice()[5..].to_owned())]
    DataBlock(String),
    /// `save_name` opens a frame, a bare `save_` (empty name) closes it
    #[regex(r"[sS][aA][vV][eE]_[^ \t\r\n\f]*", |lex| lex.slice()[5..].to_owned())]
    SaveFrame(String),

    // Field names keep their leading underscore
    #[regex(r"_[^ \t\r\n\f]+", |lex| lex.slice().to_owned())]
    DataName(String),

    #[regex(r"#[^\r\n]*", |lex| lex.slice()[1..].to_owned())]
    Comment(String),

    // Value literals
    #[regex(r"'[^'\r\n]*'", |lex| strip_delimiters(lex.slice()))]
    SingleQuoted(String),
    #[regex(r#""[^"\r\n]*""#, |lex| strip_delimiters(lex.slice()))]
    DoubleQuoted(String),
    #[regex(r#"[^ \t\r\n\f_#'"$\[\];][^ \t\r\n\f]*"#, |lex| lex.slice().to_owned())]
    Bare(String),
}

fn strip_delimiters(slice: &str) -> String {
    slice[1..slice.len() - 1].to_owned()
}

impl Token {
    /// Check if this token is a value literal
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::Bare(_) | Token::SingleQuoted(_) | Token::DoubleQuoted(_)
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Token::Comment(_))
    }

    pub fn is_data_name(&self) -> bool {
        matches!(self, Token::DataName(_))
    }

    /// Check if this token opens a new construct (loop, data block or save frame)
    pub fn is_block_marker(&self) -> bool {
        matches!(
            self,
            Token::Loop | Token::DataBlock(_) | Token::SaveFrame(_)
        )
    }

    /// Convert a value literal into an AST value, `None` for any other token
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Token::Bare(text) => Some(Value::new(text.clone(), Quoting::Bare)),
            Token::SingleQuoted(text) => Some(Value::new(text.clone(), Quoting::SingleQuoted)),
            Token::DoubleQuoted(text) => Some(Value::new(text.clone(), Quoting::DoubleQuoted)),
            _ => None,
        }
    }

    /// Short human-readable description, used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Loop => "loop_".to_string(),
            Token::DataBlock(name) => format!("data_{}", name),
            Token::SaveFrame(name) => format!("save_{}", name),
            Token::DataName(name) => format!("data name {}", name),
            Token::Comment(_) => "comment".to_string(),
            Token::SingleQuoted(text) => format!("value '{}'", text),
            Token::DoubleQuoted(text) => format!("value \"{}\"", text),
            Token::Bare(text) => format!("value {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).map(|t| t.unwrap()).collect()
    }

    #[test]
    fn test_loop_marker() {
        let mut lexer = Token::lexer("loop_");
        assert_eq!(lexer.next(), Some(Ok(Token::Loop)));
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_reserved_words_ignore_case() {
        assert_eq!(
            lex_all("LOOP_ Data_Block1 SAVE_frame save_"),
            vec![
                Token::Loop,
                Token::DataBlock("Block1".to_string()),
                Token::SaveFrame("frame".to_string()),
                Token::SaveFrame(String::new()),
            ]
        );
    }

    #[test]
    fn test_reserved_prefix_inside_word_is_bare() {
        assert_eq!(
            lex_all("loops loop_x"),
            vec![
                Token::Bare("loops".to_string()),
                Token::Bare("loop_x".to_string()),
            ]
        );
    }

    #[test]
    fn test_data_names_and_comments() {
        assert_eq!(
            lex_all("_cell.length_a #3\n# boo\n_b"),
            vec![
                Token::DataName("_cell.length_a".to_string()),
                Token::Comment("3".to_string()),
                Token::Comment(" boo".to_string()),
                Token::DataName("_b".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(
            lex_all(r#"'C 2/c' "P 1" '' "#),
            vec![
                Token::SingleQuoted("C 2/c".to_string()),
                Token::DoubleQuoted("P 1".to_string()),
                Token::SingleQuoted(String::new()),
            ]
        );
    }

    #[test]
    fn test_hash_inside_bare_word_is_not_comment() {
        assert_eq!(lex_all("a#b"), vec![Token::Bare("a#b".to_string())]);
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        let results: Vec<_> = Token::lexer("'open").collect();
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn test_classification() {
        assert!(Token::Bare("1".to_string()).is_value());
        assert!(Token::SingleQuoted("x".to_string()).is_value());
        assert!(!Token::DataName("_a".to_string()).is_value());
        assert!(Token::Comment(String::new()).is_comment());
        assert!(Token::DataName("_a".to_string()).is_data_name());
        assert!(Token::Loop.is_block_marker());
        assert!(Token::DataBlock("x".to_string()).is_block_marker());
        assert!(!Token::Comment(String::new()).is_block_marker());
    }

    #[test]
    fn test_to_value_keeps_quoting() {
        let value = Token::DoubleQuoted("?".to_string()).to_value().unwrap();
        assert_eq!(value.quoting, Quoting::DoubleQuoted);
        assert!(!value.is_unknown());
        assert_eq!(Token::Loop.to_value(), None);
    }
}
