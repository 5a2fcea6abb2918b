//! Format registry for document serialization
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`.

use crate::cif::ast::Document;
use std::collections::HashMap;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Trait for document formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "tag", "json")
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Document) -> Result<String, FormatError>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of document formatters, looked up by name
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter
    ///
    /// If a formatter with the same name already exists, it will be replaced.
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let formatter = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        formatter.serialize(doc)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Create a registry with the built-in formatters
    ///
    /// `pretty` selects indented JSON.
    pub fn with_defaults(pretty: bool) -> Self {
        let mut registry = Self::new();

        registry.register(super::TagFormatter);
        registry.register(super::JsonFormatter { pretty });
        registry.register(super::YamlFormatter);
        registry.register(super::MappingFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        assert!(!registry.has("test"));
        registry.register(TestFormatter);
        assert!(registry.has("test"));
        assert_eq!(registry.get("test").unwrap().description(), "Test formatter");
        assert_eq!(
            registry.serialize(&Document::default(), "test").unwrap(),
            "test output"
        );
    }

    #[test]
    fn test_registry_format_not_found() {
        let registry = FormatRegistry::new();
        assert_eq!(
            registry.serialize(&Document::default(), "nope"),
            Err(FormatError::FormatNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_registry_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "mapping", "tag", "yaml"]
        );
    }
}
