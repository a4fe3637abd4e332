//! Quire configuration
//!
//! Every section is optional; missing keys fall back to defaults.
//!
//! ```toml
//! [cache]
//! capacity = 1024
//!
//! [transclusion]
//! max_depth = 3
//!
//! [frontmatter]
//! reserved_keys = ["pinned", "gist_id", "font", "width", "updated_at"]
//!
//! [query]
//! default_sort = "id"
//! ```

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Frontmatter keys managed by the application and hidden from users
pub const DEFAULT_RESERVED_KEYS: &[&str] = &["pinned", "gist_id", "font", "width", "updated_at"];

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuireConfig {
    pub cache: CacheConfig,
    pub transclusion: TransclusionConfig,
    pub frontmatter: FrontmatterConfig,
    pub query: QueryConfig,
}

/// Extraction cache settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum cached extractions. `0` disables the cache.
    pub capacity: usize,
}

/// Embed inlining settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransclusionConfig {
    /// Maximum embed nesting depth
    pub max_depth: usize,
}

/// Frontmatter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontmatterConfig {
    pub reserved_keys: Vec<String>,
}

/// Query settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Sort qualifier value (e.g. `"title,id:desc"`) used when a query has no `sort:`
    pub default_sort: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 1024 }
    }
}

impl Default for TransclusionConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

impl Default for FrontmatterConfig {
    fn default() -> Self {
        Self {
            reserved_keys: DEFAULT_RESERVED_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl FrontmatterConfig {
    /// Check whether a key is reserved
    pub fn is_reserved(&self, key: &str) -> bool {
        self.reserved_keys.iter().any(|k| k == key)
    }
}

impl QuireConfig {
    /// Load configuration from a `.toml`, `.yaml` or `.yml` file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config = match extension.as_str() {
            "toml" => Self::from_toml_str(&raw)?,
            "yaml" | "yml" => Self::from_yaml_str(&raw)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(raw: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(raw: &str) -> ConfigResult<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }
}
