//! Task extraction and offset-based task mutation
//!
//! A task is a list item whose first line is `- [ ]`, `- [x]` (any bullet or
//! ordered marker). Tasks are addressed by the byte offset of their list
//! marker; mutation functions verify that a task still starts there.

use std::ops::Range;
use std::sync::LazyLock;

use quire_core::{dates, NoteType, Task};
use regex::Regex;

use crate::ast::{Ast, NodeId, NodeKind};
use crate::error::{ParserError, ParserResult};
use crate::syntax::tag::tag_with_ancestors;
use crate::syntax::{tokenize, TokenKind};

static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-*+]|\d+[.)])[ \t]+\[([ xX])\](?:[ \t]+(.*))?$").expect("task line regex")
});

/// Parts of a task line, as byte ranges into the whole content
#[derive(Debug, Clone, PartialEq, Eq)]
struct TaskLine {
    /// The whole line, without its newline
    line: Range<usize>,
    /// The character inside `[ ]`
    checkbox: usize,
    completed: bool,
    /// Text after the checkbox
    text: Option<Range<usize>>,
}

fn line_end(content: &str, from: usize) -> usize {
    content[from..].find('\n').map_or(content.len(), |i| from + i)
}

fn match_task_line(content: &str, offset: usize) -> Option<TaskLine> {
    let end = line_end(content, offset);
    let line = content[offset..end].trim_end_matches('\r');
    let caps = TASK_LINE.captures(line)?;
    let checkbox = caps.get(2)?;

    Some(TaskLine {
        line: offset..offset + line.len(),
        checkbox: offset + checkbox.start(),
        completed: checkbox.as_str() != " ",
        text: caps.get(3).map(|m| offset + m.start()..offset + m.end()),
    })
}

/// Find the list marker at or after a list item's reported start
fn marker_offset(body: &str, start: usize) -> Option<usize> {
    let end = line_end(body, start);
    body[start..end]
        .char_indices()
        .find(|&(_, c)| !matches!(c, ' ' | '\t' | '>'))
        .map(|(i, _)| start + i)
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// Choose among the date links of a task text and remove the chosen one.
///
/// `date_links` are `(id, range)` pairs in text order, with ranges into `text`.
fn choose_date(text: &str, date_links: &[(&str, Range<usize>)]) -> (Option<String>, String) {
    let leading = text.len() - text.trim_start().len();
    let chosen = match date_links.first() {
        Some(first) if first.1.start == leading => Some(first),
        _ => date_links.last(),
    };

    match chosen {
        Some((id, range)) => {
            let before = text[..range.start].trim_end();
            let after = text[range.end..].trim_start();
            let display = if before.is_empty() || after.is_empty() {
                format!("{before}{after}")
            } else {
                format!("{before} {after}")
            };
            (Some(id.to_string()), display.trim().to_string())
        }
        None => (None, text.trim().to_string()),
    }
}

/// Pick the authoritative date link of a task and remove it from the text.
///
/// If the text opens with a date link the first one wins, otherwise the last
/// one does. Other wikilinks are never removed, and links inside code spans
/// are not links at all.
pub fn select_task_date(text: &str) -> (Option<String>, String) {
    let tokens = tokenize(text);
    let date_links: Vec<(&str, Range<usize>)> = tokens
        .iter()
        .filter_map(|token| match &token.kind {
            TokenKind::Wikilink { id, .. } if dates::is_date_string(id) => Some((id.as_str(), token.range.clone())),
            _ => None,
        })
        .collect();
    choose_date(text, &date_links)
}

fn task_from_item(ast: &Ast, item: NodeId, body: &str, body_offset: usize) -> Option<Task> {
    let span = ast.node(item).span.clone()?;
    let marker = marker_offset(body, span.start)?;
    let task_line = match_task_line(body, marker)?;

    let text_range = task_line.text.clone().unwrap_or(task_line.line.end..task_line.line.end);
    let text = &body[text_range.clone()];

    // Only the task's own line counts. Continuation lines and nested items
    // belong to the item but not to the task text.
    let on_task_line = |id: NodeId| {
        ast.node(id)
            .span
            .as_ref()
            .is_some_and(|s| text_range.start <= s.start && s.end <= text_range.end)
    };

    let mut links = Vec::new();
    let mut tags = Vec::new();
    let mut priority = None;
    let mut date_links = Vec::new();
    for id in ast.descendants_pruned(item, NodeKind::is_list).filter(|&id| on_task_line(id)) {
        match ast.kind(id) {
            NodeKind::Wikilink { id: link, .. } => {
                push_unique(&mut links, link);
                if dates::is_date_string(link) {
                    if let Some(s) = &ast.node(id).span {
                        date_links.push((link.as_str(), s.start - text_range.start..s.end - text_range.start));
                    }
                }
            }
            NodeKind::Embed { id: link, .. } => push_unique(&mut links, link),
            NodeKind::Tag { name } => {
                for tag in tag_with_ancestors(name) {
                    push_unique(&mut tags, tag);
                }
            }
            NodeKind::Priority { level } if priority.is_none() => priority = Some(*level),
            _ => {}
        }
    }

    let (date, display_text) = choose_date(text, &date_links);

    Some(Task {
        note_id: String::new(),
        note_type: NoteType::default(),
        completed: task_line.completed,
        text: text.to_string(),
        display_text,
        links,
        tags,
        date,
        priority,
        start_offset: body_offset + marker,
    })
}

/// Collect tasks from a parsed body in document order.
///
/// `body_offset` is where `body` starts in the full note content, so that
/// `start_offset` indexes the full content.
pub fn extract_tasks(ast: &Ast, body: &str, body_offset: usize) -> Vec<Task> {
    ast.iter()
        .filter(|&id| ast.kind(id) == &NodeKind::ListItem)
        .filter_map(|id| task_from_item(ast, id, body, body_offset))
        .collect()
}

fn locate(content: &str, offset: usize) -> ParserResult<TaskLine> {
    if offset > content.len() {
        return Err(ParserError::out_of_bounds(offset, content.len()));
    }
    if !content.is_char_boundary(offset) {
        return Err(ParserError::task_not_found(offset));
    }
    match_task_line(content, offset).ok_or_else(|| ParserError::task_not_found(offset))
}

/// Set the completion state of the task whose marker is at `offset`
pub fn set_task_completed(content: &str, offset: usize, completed: bool) -> ParserResult<String> {
    let task = locate(content, offset)?;
    let mark = if completed { "x" } else { " " };

    let mut out = String::with_capacity(content.len());
    out.push_str(&content[..task.checkbox]);
    out.push_str(mark);
    out.push_str(&content[task.checkbox + 1..]);
    Ok(out)
}

/// Flip the completion state of the task whose marker is at `offset`
pub fn toggle_task(content: &str, offset: usize) -> ParserResult<String> {
    let task = locate(content, offset)?;
    set_task_completed(content, offset, !task.completed)
}

/// Replace the text of the task whose marker is at `offset`.
///
/// Line breaks in `text` are flattened to spaces so the task stays on one line.
pub fn update_task_text(content: &str, offset: usize, text: &str) -> ParserResult<String> {
    let task = locate(content, offset)?;
    let text = text.replace(['\r', '\n'], " ");
    let text = text.trim();

    let (range, replacement) = match task.text {
        Some(range) => (range, text.to_string()),
        None if text.is_empty() => (task.checkbox + 2..task.line.end, String::new()),
        None => (task.checkbox + 2..task.line.end, format!(" {text}")),
    };

    let mut out = String::with_capacity(content.len() + replacement.len());
    out.push_str(&content[..range.start]);
    out.push_str(&replacement);
    out.push_str(&content[range.end..]);
    Ok(out)
}

/// Delete the line of the task whose marker is at `offset`
pub fn remove_task(content: &str, offset: usize) -> ParserResult<String> {
    let task = locate(content, offset)?;
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = line_end(content, task.line.end);
    let remove_end = if line_end < content.len() { line_end + 1 } else { line_end };

    let mut out = String::with_capacity(content.len());
    out.push_str(&content[..line_start]);
    out.push_str(&content[remove_end..]);
    Ok(out)
}
