//! Error types
//!
//! Lexing and parsing failures carry byte offsets into the source. Use
//! [`ParseError::position`] with a [`SourceLocation`] to report line and column.

use std::fmt;

use crate::cif::ast::{Position, SourceLocation};
use crate::cif::formats::FormatError;

/// Input the lexer could not turn into a token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised input {text:?} at byte {offset}")]
pub struct LexError {
    pub offset: usize,
    pub text: String,
}

/// The part of a loop block that was being read when parsing failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Collecting data names after `loop_`
    Fields,
    /// Collecting values after the data names
    Values,
    /// Cutting the collected values into rows
    Reshape,
    /// Assembling blocks, pairs and save frames around loops
    Document,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Fields => "loop field list",
            Phase::Values => "loop values",
            Phase::Reshape => "loop rows",
            Phase::Document => "document",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("loop_ is not followed by any data names")]
    EmptyFields,
    #[error("loop data names are not followed by any values")]
    EmptyValues,
    #[error("{values} values do not fill rows of {fields} fields")]
    RowAlignment { fields: usize, values: usize },
    #[error("data name {tag} has no value")]
    MissingValue { tag: String },
    #[error("unexpected {found}")]
    UnexpectedToken { found: String },
    #[error("{found} appears before the first data_ header")]
    ContentOutsideDataBlock { found: String },
    #[error("save frame {name} is never closed")]
    UnterminatedSaveFrame { name: String },
    #[error("save frame {name} opened inside save frame {outer}")]
    NestedSaveFrame { name: String, outer: String },
    #[error("save_ closes no open save frame")]
    UnexpectedSaveFrameEnd,
}

/// A structural parse failure
///
/// `offset` and `token_index` point at where the failing phase began.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}: {} (at byte {})", self.phase(), self.kind, self.offset)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub token_index: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize, token_index: usize) -> Self {
        Self {
            kind,
            offset,
            token_index,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.kind {
            ParseErrorKind::EmptyFields => Phase::Fields,
            ParseErrorKind::EmptyValues => Phase::Values,
            ParseErrorKind::RowAlignment { .. } => Phase::Reshape,
            _ => Phase::Document,
        }
    }

    pub fn position(&self, location: &SourceLocation) -> Position {
        location.byte_to_position(self.offset)
    }
}

/// Crate-level error for the processor and binary
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl Error {
    /// Byte offset of the failure in the parsed source, if it has one
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Lex(err) => Some(err.offset),
            Error::Parse(err) => Some(err.offset),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
