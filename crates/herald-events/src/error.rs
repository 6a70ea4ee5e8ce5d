//! Error types for emitter configuration.

use std::io;
use thiserror::Error;

/// Errors raised while loading an [`EmitterConfig`](crate::EmitterConfig).
///
/// Registry operations themselves never fail; only the configuration seam
/// reports errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read emitter config at {path}: {source}")]
    Read {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse emitter config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
