//! Emitter configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

/// Default threshold above which registering another listener for a single
/// event logs a possible-leak warning.
pub const DEFAULT_MAX_LISTENERS: usize = 10;

/// Tunables for an [`Emitter`](crate::Emitter).
///
/// ```toml
/// max_listeners = 25
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// Per-event listener count above which a warning is logged once.
    ///
    /// `0` disables the warning.
    pub max_listeners: usize,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_listeners: DEFAULT_MAX_LISTENERS,
        }
    }
}

impl EmitterConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the leak-warning threshold (`0` disables it).
    #[must_use]
    pub fn with_max_listeners(mut self, max_listeners: usize) -> Self {
        self.max_listeners = max_listeners;
        self
    }

    /// Parse a config from TOML text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown fields.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), max_listeners = config.max_listeners, "Loaded emitter config");
        Ok(config)
    }

    /// Whether `count` listeners on one event exceeds the configured threshold.
    pub(crate) fn exceeds_max_listeners(&self, count: usize) -> bool {
        self.max_listeners != 0 && count > self.max_listeners
    }
}
