//! Configuration loading for the CLI

use anyhow::{Context, Result};
use quire_core::QuireConfig;
use std::path::Path;
use tracing::debug;

/// Load the config file if one was given, otherwise defaults
pub fn load(path: Option<&Path>) -> Result<QuireConfig> {
    match path {
        Some(path) => {
            let config = QuireConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        }
        None => Ok(QuireConfig::default()),
    }
}
