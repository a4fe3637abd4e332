//! A directory of markdown notes
//!
//! Note ids are paths relative to the root, `/`-separated, without the
//! `.md` extension. Hidden directories are skipped.

use anyhow::{Context, Result};
use quire_core::{attach_backlinks, Note};
use quire_parser::NoteParser;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

fn is_hidden(path: &Path, root: &Path) -> bool {
    path != root
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.'))
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension().and_then(|ext| ext.to_str()) == Some("md")
}

/// Id of a note file below `root`
pub fn note_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}

/// Note contents keyed by id
pub struct Vault {
    root: PathBuf,
    contents: BTreeMap<String, String>,
}

impl Vault {
    pub fn load(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("Not a directory: {}", root.display());
        }

        let mut contents = BTreeMap::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_hidden(e.path(), root))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }
            let Some(id) = note_id(root, path) else {
                warn!(path = %path.display(), "Skipping file with a non UTF-8 path");
                continue;
            };
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            contents.insert(id, content);
        }

        debug!(root = %root.display(), notes = contents.len(), "Loaded vault");
        Ok(Self {
            root: root.to_path_buf(),
            contents,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.contents.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Parse every note, in id order, with backlinks attached
    pub fn notes(&self, parser: &NoteParser) -> Vec<Note> {
        let mut notes: Vec<Note> = self
            .contents
            .iter()
            .map(|(id, content)| parser.parse_note(id, content))
            .collect();
        attach_backlinks(&mut notes);
        notes
    }
}
