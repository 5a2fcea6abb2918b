//! Lexer module for CIF-style data files
//!
//! This module contains the tokenization logic: token definitions and the
//! logos-backed lexer functions. Whitespace is dropped during lexing, comments
//! are kept as tokens so that consumers decide where they are allowed.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::Token;

/// Type alias for token with span
pub type TokenSpan = (Token, std::ops::Range<usize>);
