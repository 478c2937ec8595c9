//! Configuration loader for the reindent layout engine.
//!
//! `defaults/reindent.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`ReindentConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use reindent::layout::LayoutOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/reindent.default.toml");

/// Top-level configuration consumed by reindent applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ReindentConfig {
    pub indent: IndentConfig,
    pub comments: CommentsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndentConfig {
    pub unit_width: usize,
    pub respect_feature_flags: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsConfig {
    pub closing_keywords: Vec<String>,
}

impl ReindentConfig {
    /// Options for one layout run.
    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            indent_width: self.indent.unit_width,
            closing_keywords: self.comments.closing_keywords.clone(),
            respect_feature_flags: self.indent.respect_feature_flags,
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.indent.unit_width == 0 {
            return Err(ConfigError::Message(
                "indent.unit_width must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Stack of configuration sources, later ones winning, with the embedded
/// defaults at the bottom.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file that must exist; `build` fails when it does not.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Add a TOML file that may be missing, such as a per-project override.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Force one dotted key, e.g. `indent.unit_width`, above every file.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the sources and reject values the layout engine cannot use.
    pub fn build(self) -> Result<ReindentConfig, ConfigError> {
        self.builder
            .build()?
            .try_deserialize::<ReindentConfig>()?
            .validate()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<ReindentConfig, ConfigError> {
    Loader::new().build()
}
