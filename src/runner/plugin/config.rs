//! Runtime configuration file parsing.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The configuration is not valid TOML or has unknown keys.
    #[error("invalid runtime config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings under the `[runtime]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeSettings {
    /// Seed for `math.random`. Unset means seeding from OS entropy.
    pub random_seed: Option<u64>,
    /// Make `%` by zero a `DivisionError` instead of yielding NaN.
    pub trap_division_by_zero: bool,
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub runtime: RuntimeSettings,
}

impl RuntimeConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [runtime]
    /// random_seed = 42
    /// trap_division_by_zero = false
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), ?config, "loaded runtime config");
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.runtime.random_seed = Some(seed);
        self
    }

    pub fn with_division_trap(mut self, trap: bool) -> Self {
        self.runtime.trap_division_by_zero = trap;
        self
    }
}
