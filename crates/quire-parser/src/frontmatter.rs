//! Frontmatter parsing and line-preserving patching
//!
//! A frontmatter block is a `---` line at byte offset 0, YAML lines, and a
//! closing `---` line. Parsing goes through serde_yaml. Patching works on the
//! raw block lines so that untouched lines keep their exact formatting.

use std::collections::HashSet;
use std::sync::LazyLock;

use quire_core::dates;
use quire_core::frontmatter::format_number;
use quire_core::{Frontmatter, FrontmatterValue};
use regex::Regex;
use tracing::warn;

const DELIMITER: &str = "---";

static PLAIN_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*$").expect("plain key regex"));

static YAML_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[-+]?(?:\.inf|\.nan|0x[0-9a-f_]+|0o[0-7_]+|0b[01_]+|[0-9][0-9_]*(?:\.[0-9_]*)?(?:e[-+]?[0-9]+)?|\.[0-9]+(?:e[-+]?[0-9]+)?)$",
    )
    .expect("yaml number regex")
});

static YAML_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}(?:[Tt ]|$)").expect("yaml timestamp regex"));

/// Result of splitting a document into frontmatter and body
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFrontmatter<'a> {
    pub frontmatter: Frontmatter,
    /// Content after the block, leading blank lines removed
    pub body: &'a str,
    /// Byte offset of `body` in the original content
    pub body_offset: usize,
}

/// Raw location of a delimited block
struct Block<'a> {
    yaml: &'a str,
    /// Byte offset just past the closing delimiter line
    end: usize,
}

fn locate(content: &str) -> Option<Block<'_>> {
    let rest = content.strip_prefix("---\n")?;
    let mut offset = DELIMITER.len() + 1;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            return Some(Block {
                yaml: &content[DELIMITER.len() + 1..offset],
                end: offset + line.len(),
            });
        }
        offset += line.len();
    }
    None
}

fn block_lines(yaml: &str) -> Vec<String> {
    let yaml = yaml.strip_suffix('\n').unwrap_or(yaml);
    if yaml.is_empty() {
        return Vec::new();
    }
    yaml.split('\n').map(str::to_string).collect()
}

/// A top-level `key: value` entry spanning one or more block lines
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    /// First line index
    start: usize,
    /// One past the last line index
    end: usize,
    /// Byte index of the `:` in the first line
    colon: usize,
}

fn parse_key_line(line: &str) -> Option<(String, usize)> {
    let first = line.chars().next()?;
    if first.is_whitespace() || matches!(first, '#' | '-') {
        return None;
    }

    let (key, key_end) = match first {
        '"' => {
            let mut escaped = false;
            let close = line
                .char_indices()
                .skip(1)
                .find(|&(_, c)| {
                    let end = c == '"' && !escaped;
                    escaped = c == '\\' && !escaped;
                    end
                })
                .map(|(i, _)| i)?;
            let key: String = serde_json::from_str(&line[..=close]).ok()?;
            (key, close + 1)
        }
        '\'' => {
            let bytes = line.as_bytes();
            let mut i = 1;
            let close = loop {
                match bytes.get(i) {
                    Some(b'\'') if bytes.get(i + 1) == Some(&b'\'') => i += 2,
                    Some(b'\'') => break i,
                    Some(_) => i += 1,
                    None => return None,
                }
            };
            (line[1..close].replace("''", "'"), close + 1)
        }
        _ => {
            let colon = line
                .match_indices(':')
                .map(|(i, _)| i)
                .find(|&i| line[i + 1..].chars().next().map_or(true, char::is_whitespace))?;
            let key = line[..colon].trim_end();
            if key.is_empty() {
                return None;
            }
            return Some((key.to_string(), colon));
        }
    };

    let after = &line[key_end..];
    let colon = key_end + (after.len() - after.trim_start().len());
    line[colon..].starts_with(':').then_some((key, colon))
}

fn is_continuation(line: &str) -> bool {
    line.starts_with([' ', '\t', '-'])
}

fn scan_entries(lines: &[String]) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let Some((key, colon)) = parse_key_line(&lines[i]) else {
            i += 1;
            continue;
        };

        let start = i;
        let mut end = i + 1;
        let mut j = i + 1;
        while j < lines.len() {
            let line = &lines[j];
            if is_continuation(line) {
                end = j + 1;
            } else if !line.trim().is_empty() {
                break;
            }
            j += 1;
        }

        entries.push(Entry {
            key,
            start,
            end,
            colon,
        });
        i = end;
    }
    entries
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    }
}

fn convert(value: serde_yaml::Value) -> FrontmatterValue {
    match value {
        serde_yaml::Value::Null => FrontmatterValue::Null,
        serde_yaml::Value::Bool(b) => FrontmatterValue::Bool(b),
        serde_yaml::Value::Number(n) => n.as_f64().map_or(FrontmatterValue::Null, FrontmatterValue::Number),
        serde_yaml::Value::String(s) => FrontmatterValue::String(s),
        serde_yaml::Value::Sequence(items) => FrontmatterValue::List(items.into_iter().map(convert).collect()),
        serde_yaml::Value::Mapping(map) => FrontmatterValue::Map(
            map.into_iter()
                .map(|(k, v)| (yaml_key(k), convert(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => convert(tagged.value),
    }
}

/// Parse a block's YAML, or `None` when it is not a mapping
fn parse_block(yaml: &str) -> Option<Frontmatter> {
    let value: serde_yaml::Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Ignoring invalid frontmatter");
            return None;
        }
    };

    let mut frontmatter: Frontmatter = match value {
        serde_yaml::Value::Mapping(map) => map
            .into_iter()
            .map(|(k, v)| (yaml_key(k), convert(v)))
            .collect(),
        serde_yaml::Value::Null => Frontmatter::new(),
        _ => {
            warn!("Ignoring frontmatter that is not a mapping");
            return None;
        }
    };

    // serde_yaml has no timestamp type: unquoted YYYY-MM-DD scalars become dates
    let lines = block_lines(yaml);
    for entry in scan_entries(&lines) {
        let raw = lines[entry.start][entry.colon + 1..].trim();
        let date = match frontmatter.get(&entry.key) {
            Some(FrontmatterValue::String(s)) if s == raw => dates::parse_date(s),
            _ => None,
        };
        if let Some(date) = date {
            frontmatter.insert(entry.key, FrontmatterValue::Date(date));
        }
    }

    Some(frontmatter)
}

/// Locate a block whose YAML parses
fn valid_block(content: &str) -> Option<(Block<'_>, Frontmatter)> {
    let block = locate(content)?;
    let frontmatter = parse_block(block.yaml)?;
    Some((block, frontmatter))
}

/// Split `content` into frontmatter and body.
///
/// Without a well-formed block the frontmatter is empty and the body is the
/// whole, unmodified content.
pub fn parse_frontmatter(content: &str) -> ParsedFrontmatter<'_> {
    match valid_block(content) {
        Some((block, frontmatter)) => {
            let rest = &content[block.end..];
            let body = rest.trim_start_matches(['\n', '\r']);
            ParsedFrontmatter {
                frontmatter,
                body,
                body_offset: block.end + (rest.len() - body.len()),
            }
        }
        None => ParsedFrontmatter {
            frontmatter: Frontmatter::new(),
            body: content,
            body_offset: 0,
        },
    }
}

fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Plain scalars serde_yaml resolves to a bool or null. `yes`, `on` and the
/// other YAML 1.1 spellings are strings.
fn is_yaml_keyword(s: &str) -> bool {
    matches!(
        s,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" | "null" | "Null" | "NULL" | "~"
    )
}

fn needs_quotes(s: &str, flow: bool) -> bool {
    if s.is_empty() || s.trim() != s || s.contains('\n') {
        return true;
    }
    if s.contains(": ") || s.contains('#') || s.ends_with(':') {
        return true;
    }
    if s.starts_with([
        '-', '?', ':', ',', '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`',
    ]) {
        return true;
    }
    if flow && s.contains([',', '[', ']', '{', '}', ':']) {
        return true;
    }
    if is_yaml_keyword(s) {
        return true;
    }
    YAML_NUMBER.is_match(s) || YAML_TIMESTAMP.is_match(s)
}

fn format_string(s: &str, flow: bool) -> String {
    if needs_quotes(s, flow) {
        quote(s)
    } else {
        s.to_string()
    }
}

fn format_inner(value: &FrontmatterValue, flow: bool) -> String {
    match value {
        FrontmatterValue::Null => "null".to_string(),
        FrontmatterValue::Bool(b) => b.to_string(),
        FrontmatterValue::Number(n) => format_number(*n),
        FrontmatterValue::Date(d) => dates::format_date(*d),
        FrontmatterValue::String(s) => format_string(s, flow),
        FrontmatterValue::List(items) => {
            let items: Vec<String> = items.iter().map(|v| format_inner(v, true)).collect();
            format!("[{}]", items.join(", "))
        }
        FrontmatterValue::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", format_key(k), format_inner(v, true)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Render a value as it appears after `key:` on a frontmatter line.
///
/// Strings are left bare unless YAML would read them as something else.
/// Lists and maps use flow style.
pub fn format_value(value: &FrontmatterValue) -> String {
    format_inner(value, false)
}

/// Render a key, quoting it unless it is a plain identifier.
///
/// Identifiers that YAML reads as a bool or null (`true`, `Null`) are quoted
/// too, or they would not read back as the same key.
pub fn format_key(key: &str) -> String {
    if PLAIN_KEY.is_match(key) && !is_yaml_keyword(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn apply_update(lines: &mut Vec<String>, key: &str, value: Option<&FrontmatterValue>) {
    let entry = scan_entries(lines).into_iter().find(|e| e.key == key);
    match (entry, value) {
        (Some(entry), None) => {
            lines.drain(entry.start..entry.end);
        }
        (Some(entry), Some(value)) => {
            let line = &lines[entry.start];
            let after = &line[entry.colon + 1..];
            let gap = &after[..after.len() - after.trim_start_matches([' ', '\t']).len()];
            let gap = if gap.is_empty() { " " } else { gap };
            let replaced = format!("{}:{}{}", &line[..entry.colon], gap, format_value(value));
            lines.drain(entry.start + 1..entry.end);
            lines[entry.start] = replaced;
        }
        (None, Some(value)) => lines.push(format!("{}: {}", format_key(key), format_value(value))),
        (None, None) => {}
    }
}

fn assemble(lines: &[String], rest: &str) -> String {
    if lines.iter().all(|line| line.trim().is_empty()) {
        return rest.trim_start_matches(['\n', '\r']).to_string();
    }
    format!("{DELIMITER}\n{}\n{DELIMITER}\n{rest}", lines.join("\n"))
}

/// Apply several key updates. `None` deletes the key.
///
/// Untouched lines are preserved byte for byte. A block left empty is
/// removed along with its delimiters. Content without frontmatter gets a new
/// block holding the non-null updates.
pub fn update_frontmatter(content: &str, updates: &[(&str, Option<FrontmatterValue>)]) -> String {
    match valid_block(content) {
        Some((block, _)) => {
            let mut lines = block_lines(block.yaml);
            for (key, value) in updates {
                apply_update(&mut lines, key, value.as_ref());
            }
            assemble(&lines, &content[block.end..])
        }
        None => {
            let mut lines = Vec::new();
            for (key, value) in updates {
                apply_update(&mut lines, key, value.as_ref());
            }
            if lines.is_empty() {
                content.to_string()
            } else if content.is_empty() {
                format!("{DELIMITER}\n{}\n{DELIMITER}\n", lines.join("\n"))
            } else {
                format!("{DELIMITER}\n{}\n{DELIMITER}\n\n{content}", lines.join("\n"))
            }
        }
    }
}

/// Set or delete a single key
pub fn update_frontmatter_value(content: &str, key: &str, value: Option<FrontmatterValue>) -> String {
    update_frontmatter(content, &[(key, value)])
}

/// Rename a key in place, keeping the original value text.
///
/// If `new_key` is taken, the smallest free numeric suffix is appended
/// (`status1`, `status2`, ...) so no existing line is overwritten.
pub fn rename_frontmatter_key(content: &str, old_key: &str, new_key: &str) -> String {
    let new_key = new_key.trim();
    if new_key.is_empty() || new_key == old_key {
        return content.to_string();
    }
    let Some((block, _)) = valid_block(content) else {
        return content.to_string();
    };

    let mut lines = block_lines(block.yaml);
    let entries = scan_entries(&lines);
    let Some(entry) = entries.iter().find(|e| e.key == old_key) else {
        return content.to_string();
    };

    let taken: HashSet<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    let target = if taken.contains(new_key) {
        let mut n = 1;
        loop {
            let candidate = format!("{new_key}{n}");
            if !taken.contains(candidate.as_str()) {
                break candidate;
            }
            n += 1;
        }
    } else {
        new_key.to_string()
    };

    let renamed = format!("{}{}", format_key(&target), &lines[entry.start][entry.colon..]);
    lines[entry.start] = renamed;
    assemble(&lines, &content[block.end..])
}
