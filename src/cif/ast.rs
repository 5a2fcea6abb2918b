//! AST definitions for parsed CIF-style documents
//!
//! - [`Value`]: a single literal, with its quoting style
//! - [`Loop`]: one loop block, its field names and reshaped rows
//! - [`Document`]: data blocks holding tag-value pairs, loops and save frames
//! - [`SourceLocation`]: byte offset to line/column conversion for diagnostics

pub mod document;
pub mod loop_block;
pub mod position;
pub mod value;

pub use document::{DataBlock, Document, Item};
pub use loop_block::Loop;
pub use position::{Position, SourceLocation};
pub use value::{Number, Quoting, Value};
