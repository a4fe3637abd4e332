use anyhow::{Context, Result};
use quire_core::QuireConfig;
use quire_parser::inline_embeds;
use std::path::Path;

use crate::vault::Vault;

pub fn execute(config: &QuireConfig, dir: &Path, id: &str, depth: Option<usize>) -> Result<()> {
    let vault = Vault::load(dir)?;
    let content = vault
        .content(id)
        .with_context(|| format!("No note {} in {}", id, vault.root().display()))?;

    let max_depth = depth.unwrap_or(config.transclusion.max_depth);
    let exported = inline_embeds(content, |embed| vault.content(embed).map(str::to_string), max_depth);
    print!("{exported}");
    Ok(())
}
