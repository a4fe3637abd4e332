pub mod export;
pub mod frontmatter;
pub mod parse;
pub mod query;
pub mod toggle;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub(crate) fn read_note(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write only when the content changed
pub(crate) fn write_note(path: &Path, original: &str, updated: &str) -> Result<bool> {
    if original == updated {
        return Ok(false);
    }
    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
