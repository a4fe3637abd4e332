//! Note and task records
//!
//! Both are pure derivations of a note's raw content. They are rebuilt on
//! every read and never mutated in place; edits go through the content string.

use crate::dates;
use crate::frontmatter::{Frontmatter, FrontmatterValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Kind of note, derived from its id and frontmatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Note,
    Daily,
    Weekly,
    Template,
}

impl NoteType {
    /// Derive the type of a note.
    ///
    /// `YYYY-MM-DD` ids are daily notes, `YYYY-Www` ids are weekly notes, and
    /// a `template` frontmatter key (other than `false`/null) marks a template.
    pub fn derive(id: &str, frontmatter: &Frontmatter) -> Self {
        if dates::is_date_string(id) {
            return Self::Daily;
        }
        if dates::parse_week(id).is_some() {
            return Self::Weekly;
        }
        match frontmatter.get("template") {
            Some(FrontmatterValue::Null) | Some(FrontmatterValue::Bool(false)) | None => Self::Note,
            Some(_) => Self::Template,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Template => "template",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checkbox list item extracted from a note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    /// Id of the owning note
    pub note_id: String,
    /// Type of the owning note
    pub note_type: NoteType,
    pub completed: bool,
    /// Raw line content after the checkbox marker
    pub text: String,
    /// `text` without the selected date link
    pub display_text: String,
    pub links: Vec<String>,
    pub tags: Vec<String>,
    /// Selected `YYYY-MM-DD` date link, if any
    pub date: Option<String>,
    /// Priority level 1-3
    pub priority: Option<u8>,
    /// Byte offset of the list marker in the owning note's content.
    ///
    /// Only valid against the exact content string it was computed from.
    pub start_offset: usize,
}

/// A note record derived from raw markdown content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    /// Stable key, doubles as the relative file path without extension
    pub id: String,
    /// Raw source text
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    /// Text of the first level-1 heading, empty if none
    pub title: String,
    /// Target of the title when the title is a single link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub display_name: String,
    pub frontmatter: Frontmatter,
    /// Tag names including every ancestor prefix of hierarchical tags
    pub tags: Vec<String>,
    /// `YYYY-MM-DD` dates referenced by the note
    pub dates: Vec<String>,
    /// Deduplicated ids referenced via wikilinks and embeds
    pub links: Vec<String>,
    pub tasks: Vec<Task>,
    /// Ids of notes linking here, filled by [`attach_backlinks`]
    pub backlinks: Vec<String>,
}

impl Note {
    /// Tasks that are not yet completed
    pub fn incomplete_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }
}

/// Fill `backlinks` on every note by inverting the `links` relation.
///
/// Self-links are ignored. Backlinks follow the order of `notes`.
pub fn attach_backlinks(notes: &mut [Note]) {
    let mut inverted: HashMap<String, Vec<String>> = HashMap::new();
    for note in notes.iter() {
        for link in &note.links {
            if *link == note.id {
                continue;
            }
            let sources = inverted.entry(link.clone()).or_default();
            if !sources.contains(&note.id) {
                sources.push(note.id.clone());
            }
        }
    }

    for note in notes.iter_mut() {
        note.backlinks = inverted.remove(&note.id).unwrap_or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str, links: &[&str]) -> Note {
        Note {
            id: id.to_string(),
            content: String::new(),
            note_type: NoteType::Note,
            title: String::new(),
            url: None,
            display_name: id.to_string(),
            frontmatter: Frontmatter::new(),
            tags: Vec::new(),
            dates: Vec::new(),
            links: links.iter().map(|l| l.to_string()).collect(),
            tasks: Vec::new(),
            backlinks: Vec::new(),
        }
    }

    #[test]
    fn test_note_type_from_id() {
        let fm = Frontmatter::new();
        assert_eq!(NoteType::derive("2024-01-01", &fm), NoteType::Daily);
        assert_eq!(NoteType::derive("2024-W01", &fm), NoteType::Weekly);
        assert_eq!(NoteType::derive("ideas", &fm), NoteType::Note);
        assert_eq!(NoteType::derive("2024-13-01", &fm), NoteType::Note);
    }

    #[test]
    fn test_note_type_template() {
        let mut fm = Frontmatter::new();
        fm.insert("template", FrontmatterValue::Bool(true));
        assert_eq!(NoteType::derive("meeting", &fm), NoteType::Template);

        fm.insert("template", FrontmatterValue::Bool(false));
        assert_eq!(NoteType::derive("meeting", &fm), NoteType::Note);
    }

    #[test]
    fn test_attach_backlinks() {
        let mut notes = vec![note("a", &["b", "c", "a"]), note("b", &["c"]), note("c", &[])];
        attach_backlinks(&mut notes);

        assert!(notes[0].backlinks.is_empty());
        assert_eq!(notes[1].backlinks, vec!["a"]);
        assert_eq!(notes[2].backlinks, vec!["a", "b"]);
    }

    #[test]
    fn test_note_serializes_type_field() {
        let json = serde_json::to_value(note("a", &[])).unwrap();
        assert_eq!(json["type"], "note");
        assert!(json.get("url").is_none());
    }
}
