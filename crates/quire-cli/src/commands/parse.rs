use anyhow::{Context, Result};
use quire_parser::NoteParser;
use std::path::Path;

use super::read_note;

pub fn execute(parser: &NoteParser, file: &Path, id: Option<String>) -> Result<()> {
    let content = read_note(file)?;
    let id = match id {
        Some(id) => id,
        None => file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .with_context(|| format!("Cannot derive a note id from {}", file.display()))?,
    };

    let note = parser.parse_note(&id, &content);
    println!("{}", serde_json::to_string_pretty(&note)?);
    Ok(())
}
