//! Recursive embed inlining for export views
//!
//! Every `![[id]]` outside code is replaced by the body of the referenced
//! note, quoted as a blockquote with a blank line before any text after it. Inside pipe
//! tables (recognized by their delimiter row) the body is flattened onto one
//! line instead, and on a line that is already quoted the nested quote keeps
//! the outer `>` markers. Embeds that cannot be inlined (missing note, a note
//! already on the inclusion path, or nesting deeper than `max_depth`) are
//! removed together with their surrounding whitespace.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::frontmatter::parse_frontmatter;
use crate::syntax::scan_embed;

/// Default embed nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 3;

static QUOTE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?: {0,3}>[ \t]?)+").expect("quote prefix regex"));

static DELIMITER_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?[ \t]*$").expect("table delimiter regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        let marker = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = trimmed.len() - trimmed.trim_start_matches(marker).len();
        (len >= 3).then_some(Self { marker, len })
    }

    fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        let len = trimmed.len() - trimmed.trim_start_matches(self.marker).len();
        len >= self.len && len == trimmed.len()
    }
}

struct Inliner<'a, F> {
    resolve: &'a F,
    max_depth: usize,
}

impl<F> Inliner<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Fully expanded body of `id`, or `None` if it cannot be inlined here
    fn embed_body(&self, id: &str, path: &mut Vec<String>, depth: usize) -> Option<String> {
        if depth >= self.max_depth {
            debug!(id, depth, "Embed exceeds max depth");
            return None;
        }
        if path.iter().any(|p| p == id) {
            debug!(id, "Embed cycle");
            return None;
        }
        let Some(raw) = (self.resolve)(id) else {
            debug!(id, "Embedded note not found");
            return None;
        };

        path.push(id.to_string());
        let body = self.expand(parse_frontmatter(&raw).body, path, depth + 1);
        path.pop();

        let body = body.trim_end().to_string();
        (!body.trim().is_empty()).then_some(body)
    }

    fn expand(&self, body: &str, path: &mut Vec<String>, depth: usize) -> String {
        let lines: Vec<&str> = body.split_inclusive('\n').collect();
        let mut out = String::with_capacity(body.len());
        let mut fence: Option<Fence> = None;
        let mut in_table = false;
        // Gap line owed after an inlined blockquote that ended its line
        let mut open_quote: Option<String> = None;

        for (i, raw_line) in lines.iter().enumerate() {
            let (line, newline) = split_newline(raw_line);
            let unquoted = QUOTE_PREFIX.find(line).map_or(line, |m| &line[m.end()..]);

            if let Some(open) = fence {
                if open.closes(unquoted) {
                    fence = None;
                }
                out.push_str(raw_line);
                continue;
            }
            if let Some(open) = Fence::open(unquoted) {
                if let Some(gap) = open_quote.take() {
                    out.push_str(&gap);
                    out.push('\n');
                }
                fence = Some(open);
                out.push_str(raw_line);
                continue;
            }

            if line.trim().is_empty() {
                in_table = false;
            } else if !in_table && line.contains('|') {
                in_table = lines
                    .get(i + 1)
                    .is_some_and(|next| is_delimiter_row(split_newline(next).0));
            }

            let Some(expanded) = self.expand_line(line, in_table, path, depth) else {
                continue;
            };
            if !expanded.text.trim().is_empty() {
                if let Some(gap) = open_quote.take() {
                    out.push_str(&gap);
                    out.push('\n');
                }
            }
            out.push_str(&expanded.text);
            out.push_str(newline);
            open_quote = expanded.open_quote;
        }
        out
    }

    /// Expand the embeds of one line. `None` drops a line left empty by removals.
    fn expand_line(&self, line: &str, table_row: bool, path: &mut Vec<String>, depth: usize) -> Option<Expanded> {
        let prefix = QUOTE_PREFIX.find(line).map_or("", |m| m.as_str());
        if !prefix.is_empty() {
            let content = &line[prefix.len()..];
            let inner = self.expand_line(content, table_row, path, depth)?;
            if inner.open_quote.is_none() && inner.text == content {
                return Some(Expanded {
                    text: line.to_string(),
                    open_quote: None,
                });
            }
            let text = inner
                .text
                .split('\n')
                .map(|l| if l.is_empty() { prefix.trim_end().to_string() } else { format!("{prefix}{l}") })
                .collect::<Vec<_>>()
                .join("\n");
            return Some(Expanded {
                text,
                open_quote: inner.open_quote.map(|gap| format!("{prefix}{gap}").trim_end().to_string()),
            });
        }

        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        let mut touched = false;
        let mut quote_end = None;

        while let Some(pos) = rest.find(['!', '`']) {
            let (before, tail) = rest.split_at(pos);
            out.push_str(before);

            if tail.starts_with('`') {
                let ticks = tail.len() - tail.trim_start_matches('`').len();
                let delimiter = &tail[..ticks];
                let end = tail[ticks..]
                    .find(delimiter)
                    .map_or(ticks, |close| ticks + close + ticks);
                out.push_str(&tail[..end]);
                rest = &tail[end..];
                continue;
            }

            let Some(embed) = scan_embed(tail) else {
                out.push('!');
                rest = &tail[1..];
                continue;
            };
            touched = true;
            let after = &tail[embed.len..];

            match self.embed_body(&embed.id, path, depth) {
                Some(body) if table_row => {
                    let flat: Vec<&str> = body.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
                    out.push_str(&flat.join(" "));
                    rest = after;
                }
                Some(body) => {
                    if !out.trim().is_empty() {
                        let kept = out.trim_end().len();
                        out.truncate(kept);
                        out.push_str("\n\n");
                    }
                    out.push_str(&blockquote(&body));
                    quote_end = Some(out.len());
                    rest = after.trim_start();
                    if !rest.is_empty() {
                        out.push_str("\n\n");
                    }
                }
                None => {
                    let kept = out.trim_end_matches([' ', '\t']).len();
                    out.truncate(kept);
                    rest = after.trim_start_matches([' ', '\t']);
                    if !out.trim().is_empty() && !rest.is_empty() {
                        out.push(' ');
                    }
                }
            }
        }
        out.push_str(rest);

        if touched && out.trim().is_empty() {
            return None;
        }
        let open_quote = (quote_end == Some(out.len())).then(String::new);
        Some(Expanded { text: out, open_quote })
    }
}

/// One expanded source line
struct Expanded {
    text: String,
    /// Set when the line ends inside an inlined blockquote. Holds the blank
    /// line (with any outer quote markers) that must separate it from a
    /// following non-blank line, so that line is not pulled into the quote.
    open_quote: Option<String>,
}

fn split_newline(raw_line: &str) -> (&str, &str) {
    match raw_line.strip_suffix('\n') {
        Some(line) => (line, "\n"),
        None => (raw_line, ""),
    }
}

/// A pipe table delimiter row such as `|---|:--:|` or `--- | ---`
fn is_delimiter_row(line: &str) -> bool {
    line.contains('|') && DELIMITER_ROW.is_match(line)
}

fn blockquote(body: &str) -> String {
    body.lines()
        .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inline embeds in `content`, resolving note ids to raw content with `resolve`.
///
/// The frontmatter of `content` is kept as is; embedded notes contribute
/// their bodies only.
pub fn inline_embeds<F>(content: &str, resolve: F, max_depth: usize) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let parsed = parse_frontmatter(content);
    let inliner = Inliner {
        resolve: &resolve,
        max_depth,
    };

    let mut out = content[..parsed.body_offset].to_string();
    out.push_str(&inliner.expand(parsed.body, &mut Vec::new(), 0));
    out
}
