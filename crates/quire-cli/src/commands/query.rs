use anyhow::Result;
use quire_core::{QuireConfig, Task};
use quire_parser::NoteParser;
use quire_query::{parse_query, parse_sort, QueryEngine};
use std::path::Path;
use tracing::debug;

use crate::vault::Vault;

pub fn execute(
    config: &QuireConfig,
    parser: &NoteParser,
    dir: &Path,
    input: &str,
    tasks: bool,
    json: bool,
) -> Result<()> {
    let vault = Vault::load(dir)?;
    let notes = vault.notes(parser);
    let engine = QueryEngine::new();

    let mut query = parse_query(input);
    if query.sorts.is_empty() {
        if let Some(default_sort) = &config.query.default_sort {
            query.sorts = parse_sort(default_sort);
        }
    }
    debug!(?query, "Parsed query");

    if tasks {
        let all: Vec<Task> = notes.iter().flat_map(|note| note.tasks.iter().cloned()).collect();
        let matched = engine.query_tasks(&all, &query);
        if json {
            println!("{}", serde_json::to_string_pretty(&matched)?);
        } else {
            for task in matched {
                let mark = if task.completed { "x" } else { " " };
                println!("{}:{}\t[{}] {}", task.note_id, task.start_offset, mark, task.display_text);
            }
        }
    } else {
        let matched = engine.query_notes(&notes, &query);
        if json {
            println!("{}", serde_json::to_string_pretty(&matched)?);
        } else {
            for note in matched {
                println!("{}\t{}", note.id, note.display_name);
            }
        }
    }
    Ok(())
}
