//! Configuration loading
//!
//! The embedded `defaults/cifloop.default.toml` is always the bottom layer.
//! A `cifloop.toml` in the working directory, an explicit `--config` file and
//! command-line overrides are stacked on top by [`Loader`], in that order.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use crate::cif::parsing::ParseOptions;

const DEFAULT_TOML: &str = include_str!("../../defaults/cifloop.default.toml");

/// File name picked up from a project directory when present
pub const PROJECT_CONFIG: &str = "cifloop.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CifLoopConfig {
    pub parse: ParseConfig,
    pub output: OutputConfig,
}

/// Parser acceptance rules
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ParseConfig {
    pub allow_empty_loops: bool,
    pub require_data_block: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Name of a registered formatter
    pub format: String,
    pub pretty: bool,
}

impl From<&ParseConfig> for ParseOptions {
    fn from(config: &ParseConfig) -> Self {
        ParseOptions {
            allow_empty_loops: config.allow_empty_loops,
            require_data_block: config.require_data_block,
        }
    }
}

/// Stacks config sources over the embedded defaults; later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Add `dir/cifloop.toml` if it exists; a missing file adds nothing.
    pub fn with_project_file(mut self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_CONFIG);
        tracing::debug!(path = %path.display(), "checking for project config");
        let source = File::from(path).format(FileFormat::Toml).required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `parse.allow_empty_loops`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<CifLoopConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults, deserialized.
pub fn load_defaults() -> Result<CifLoopConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.parse.allow_empty_loops);
        assert!(!config.parse.require_data_block);
        assert_eq!(config.output.format, "tag");
        assert!(config.output.pretty);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("parse.allow_empty_loops", true)
            .expect("override to apply")
            .set_override("output.format", "json")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert!(config.parse.allow_empty_loops);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn parse_config_converts_to_options() {
        let options = ParseOptions::from(&ParseConfig {
            allow_empty_loops: true,
            require_data_block: false,
        });
        assert!(options.allow_empty_loops);
        assert!(!options.require_data_block);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new()
            .with_file("/nonexistent/cifloop.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_project_file_is_ignored() {
        let config = Loader::new()
            .with_project_file("/nonexistent")
            .build()
            .expect("absent project file to be skipped");
        assert!(!config.parse.allow_empty_loops);
        assert_eq!(config.output.format, "tag");
    }

    #[test]
    fn project_file_is_layered_under_explicit_settings() {
        let dir = std::env::temp_dir().join(format!("cifloop-project-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir to be created");
        std::fs::write(
            dir.join(PROJECT_CONFIG),
            "[parse]\nallow_empty_loops = true\n\n[output]\nformat = \"yaml\"\n",
        )
        .expect("project file to be written");

        let from_project = Loader::new().with_project_file(&dir).build();
        let overridden = Loader::new()
            .with_project_file(&dir)
            .set_override("output.format", "json")
            .and_then(Loader::build);
        std::fs::remove_dir_all(&dir).ok();

        let config = from_project.expect("project file to load");
        assert!(config.parse.allow_empty_loops);
        assert!(!config.parse.require_data_block);
        assert_eq!(config.output.format, "yaml");

        let config = overridden.expect("override to apply");
        assert!(config.parse.allow_empty_loops);
        assert_eq!(config.output.format, "json");
    }
}
