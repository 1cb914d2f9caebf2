//! Layered host defaults
//!
//! `defaults/shelfhost.default.toml` is embedded into the binary. Callers layer
//! a user file and explicit overrides on top via [`Loader`] before
//! deserializing into [`HostDefaults`]. The command line is applied after all
//! of these and wins over every layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::host::StartMode;

const DEFAULT_TOML: &str = include_str!("../defaults/shelfhost.default.toml");

/// Values seeded into a [`HostConfigurator`](crate::host::HostConfigurator)
/// before any command line is applied.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostDefaults {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub instance_name: String,
    pub start_mode: StartMode,
    pub start_timeout_secs: u64,
    pub stop_timeout_secs: u64,
}

impl HostDefaults {
    pub fn start_timeout(&self) -> Duration {
        Duration::from_secs(self.start_timeout_secs)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_secs(self.stop_timeout_secs)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored when absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<HostDefaults, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<HostDefaults, ConfigError> {
    Loader::new().build()
}
