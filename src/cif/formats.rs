//! Output format implementations for parsed documents
//!
//! - `tag`: XML-like tree of blocks, loops and rows
//! - `json` / `yaml`: serde serialization of the document
//! - `mapping`: each loop as a `{(fields): [(row), ...]}` mapping

pub mod mapping;
pub mod registry;
pub mod serde_formats;
pub mod tag;

pub use mapping::{serialize_document as serialize_mapping, MappingFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use tag::{serialize_document as serialize_tag, TagFormatter};
