//! File processing API
//!
//! Ties the pieces together: configuration decides the parse options and the
//! default output format, the parser builds a [`Document`], and the format
//! registry renders it.
//!
//! ```rust,ignore
//! use cifloop::cif::config::load_defaults;
//! use cifloop::cif::processor::Processor;
//!
//! let processor = Processor::new(load_defaults()?);
//! let output = processor.process_str("loop_ _a _b 1 2 3 4", "mapping")?;
//! ```

use std::fs;
use std::path::Path;

use crate::cif::ast::Document;
use crate::cif::config::CifLoopConfig;
use crate::cif::error::{Error, Result};
use crate::cif::formats::FormatRegistry;
use crate::cif::lexing::tokenize_with_spans;
use crate::cif::parsing::{parse_document, ParseOptions};

/// Two loops, with comments in both the field list and the values
pub const SELF_TEST_SAMPLE: &str = "
\tloop_
\t_a
\t_b #3
\t# boo
\t_c
\t1 2 3 # test
\t4 5 6
\tloop_
\t_a
\t_b
\t1 2
\t3 4
\t5 6
\t";

pub struct Processor {
    options: ParseOptions,
    default_format: String,
    registry: FormatRegistry,
}

impl Processor {
    pub fn new(config: CifLoopConfig) -> Self {
        Self {
            options: ParseOptions::from(&config.parse),
            default_format: config.output.format,
            registry: FormatRegistry::with_defaults(config.output.pretty),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    pub fn parse_str(&self, source: &str) -> Result<Document> {
        parse_document(source, &self.options)
    }

    /// Parse `source` and render it; `format` falls back to the configured default
    pub fn process_str(&self, source: &str, format: Option<&str>) -> Result<String> {
        let format = format.unwrap_or(&self.default_format);
        if !self.registry.has(format) {
            return Err(crate::cif::formats::FormatError::FormatNotFound(format.to_string()).into());
        }
        let document = self.parse_str(source)?;
        Ok(self.registry.serialize(&document, format)?)
    }

    pub fn process_file<P: AsRef<Path>>(&self, path: P, format: Option<&str>) -> Result<String> {
        let source = read_source(path.as_ref())?;
        self.process_str(&source, format)
    }

    /// One line per token: byte range and debug form
    pub fn tokens(&self, source: &str) -> Result<String> {
        let tokens = tokenize_with_spans(source)?;
        Ok(tokens
            .iter()
            .map(|(token, span)| format!("{}..{} {:?}\n", span.start, span.end, token))
            .collect())
    }

    /// Parse the built-in two-loop sample and render it as mappings
    pub fn self_test(&self) -> Result<String> {
        let document = parse_document(SELF_TEST_SAMPLE, &self.options)?;
        tracing::info!(loops = document.loops().len(), "self-test sample parsed");
        Ok(self.registry.serialize(&document, "mapping")?)
    }
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })
}
