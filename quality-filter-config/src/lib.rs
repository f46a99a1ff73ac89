//! Shared configuration loader for the quality filter.
//!
//! `defaults/quality.default.toml` is embedded into every binary so that the
//! built-in token catalog and runtime behavior stay in sync. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`FilterConfig`]. A user file that defines `tokens`
//! replaces the built-in catalog wholesale.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/quality.default.toml");

/// Top-level configuration consumed by quality filter applications.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    pub tokens: Vec<TokenConfig>,
    pub session: SessionConfig,
}

/// One catalog entry as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenConfig {
    pub key: String,
    pub name: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub default_logic_mode: LogicModeSetting,
}

/// Logic mode a fresh selection starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicModeSetting {
    And,
    Or,
}

impl LogicModeSetting {
    pub fn as_str(self) -> &'static str {
        match self {
            LogicModeSetting::And => "and",
            LogicModeSetting::Or => "or",
        }
    }
}

/// Settings file picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "qfilter.toml";

/// Layers catalog files and session settings over the built-in defaults.
///
/// Later layers win: embedded defaults, then files in the order they were
/// added, then [`Loader::with_logic_mode`].
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// Layer a settings file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a settings file if it exists, such as [`LOCAL_CONFIG_FILE`].
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Pin the mode fresh selections start in, regardless of any file.
    pub fn with_logic_mode(mut self, mode: LogicModeSetting) -> Result<Self, ConfigError> {
        self.builder = self
            .builder
            .set_override("session.default_logic_mode", mode.as_str())?;
        Ok(self)
    }

    pub fn build(self) -> Result<FilterConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults alone.
pub fn load_defaults() -> Result<FilterConfig, ConfigError> {
    Loader::new().build()
}
