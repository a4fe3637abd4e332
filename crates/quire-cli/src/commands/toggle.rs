use anyhow::{Context, Result};
use quire_parser::toggle_task;
use std::path::Path;

use super::{read_note, write_note};

pub fn execute(file: &Path, offset: usize) -> Result<()> {
    let original = read_note(file)?;
    let updated = toggle_task(&original, offset)
        .with_context(|| format!("Cannot toggle task in {}", file.display()))?;
    write_note(file, &original, &updated)?;

    let state = if is_checked(&updated, offset) { "Completed" } else { "Reopened" };
    println!("{state} task at {offset}");
    Ok(())
}

/// Checkbox state of a task line already validated by `toggle_task`
fn is_checked(content: &str, offset: usize) -> bool {
    content[offset..]
        .find('[')
        .and_then(|i| content[offset + i + 1..].chars().next())
        .is_some_and(|c| c != ' ')
}
