use anyhow::Result;
use quire_core::{dates, FrontmatterValue, QuireConfig};
use quire_parser::{rename_frontmatter_key, update_frontmatter_value};
use std::path::Path;
use tracing::warn;

use super::{read_note, write_note};

/// Interpret a command-line value the way an unquoted YAML scalar reads
pub fn parse_value(raw: &str, force_string: bool) -> FrontmatterValue {
    if force_string {
        return FrontmatterValue::from(raw);
    }
    match raw {
        "true" => return FrontmatterValue::Bool(true),
        "false" => return FrontmatterValue::Bool(false),
        "null" | "~" => return FrontmatterValue::Null,
        _ => {}
    }
    if let Some(date) = dates::parse_date(raw) {
        return FrontmatterValue::Date(date);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => FrontmatterValue::Number(n),
        _ => FrontmatterValue::from(raw),
    }
}

pub fn set(config: &QuireConfig, file: &Path, key: &str, value: Option<&str>, force_string: bool) -> Result<()> {
    if config.frontmatter.is_reserved(key) {
        warn!(key, "Editing a reserved frontmatter key");
    }

    let original = read_note(file)?;
    let value = value.map(|raw| parse_value(raw, force_string));
    let updated = update_frontmatter_value(&original, key, value);
    if write_note(file, &original, &updated)? {
        println!("Updated {}", file.display());
    } else {
        println!("No change");
    }
    Ok(())
}

pub fn rename_key(file: &Path, old: &str, new: &str) -> Result<()> {
    let original = read_note(file)?;
    let updated = rename_frontmatter_key(&original, old, new);
    if write_note(file, &original, &updated)? {
        println!("Renamed {} in {}", old, file.display());
    } else {
        println!("No change");
    }
    Ok(())
}
