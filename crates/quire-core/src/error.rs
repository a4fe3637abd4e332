//! Core error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// TOML syntax or schema error
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or schema error
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Extension is neither TOML nor YAML
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Specialized Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    /// Create an IO error for a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
