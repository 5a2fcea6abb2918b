//! Parsing of token streams into loops and documents
//!
//! The loop block parser is the core: given a cursor just past `loop_`, it
//! reads the data names, then the values, and cuts the values into rows. The
//! document assembler is its caller, walking data blocks, tag-value pairs and
//! save frames and handing every `loop_` to the loop parser.
//!
//! Both are explicit phase loops with one token of lookahead; the first token
//! that cannot continue a phase ends it.

pub mod cursor;
pub mod document;
pub mod loop_block;

pub use cursor::TokenCursor;
pub use document::{assemble, parse_document};
pub use loop_block::{parse_loop, parse_loop_at, reshape};

/// Knobs that change what the parsers accept
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept a loop header with no values as a loop with zero rows
    pub allow_empty_loops: bool,
    /// Reject tag-value pairs and loops that come before any `data_` header
    pub require_data_block: bool,
}
