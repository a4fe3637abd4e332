//! Note and task extraction
//!
//! [`NoteParser`] turns raw note content into a [`ParsedContent`] (cached per
//! content string) and then into a [`Note`] for a given id.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use markdown_it::MarkdownIt;
use quire_core::{dates, Frontmatter, FrontmatterValue, Note, NoteType, QuireConfig, Task};

use crate::ast::{Ast, NodeKind};
use crate::cache::{CacheStats, ExtractionCache};
use crate::frontmatter::parse_frontmatter;
use crate::markdown_it::{create_parser, parse_ast};
use crate::syntax::tag::tag_with_ancestors;
use crate::tasks::extract_tasks;

/// Everything derived from a note's content, independent of its id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedContent {
    pub title: String,
    pub url: Option<String>,
    pub frontmatter: Frontmatter,
    pub tags: Vec<String>,
    pub dates: Vec<String>,
    pub links: Vec<String>,
    /// Tasks with empty `note_id`; [`NoteParser::parse_note`] fills it in
    pub tasks: Vec<Task>,
}

/// Insertion-ordered set of strings
#[derive(Default)]
struct OrderedSet(Vec<String>);

impl OrderedSet {
    fn insert(&mut self, value: &str) {
        if !self.0.iter().any(|v| v == value) {
            self.0.push(value.to_string());
        }
    }

    fn insert_tag(&mut self, name: &str) {
        for tag in tag_with_ancestors(name) {
            self.insert(tag);
        }
    }
}

fn title_and_url(ast: &Ast) -> (String, Option<String>) {
    let Some(heading) = ast
        .iter()
        .find(|&id| ast.kind(id) == &NodeKind::Heading { level: 1 })
    else {
        return (String::new(), None);
    };

    let title = ast.plain_text(heading).trim().to_string();
    let url = match ast.children(heading) {
        [only] => match ast.kind(*only) {
            NodeKind::Link { url } => Some(url.clone()),
            _ => None,
        },
        _ => None,
    };
    (title, url)
}

fn frontmatter_tags(value: &FrontmatterValue, tags: &mut OrderedSet) {
    match value {
        FrontmatterValue::List(items) => {
            for item in items {
                frontmatter_tags(item, tags);
            }
        }
        FrontmatterValue::String(s) => {
            for name in s.split(|c: char| c == ',' || c.is_whitespace()) {
                let name = name.trim().trim_start_matches('#');
                if !name.is_empty() {
                    tags.insert_tag(name);
                }
            }
        }
        _ => {}
    }
}

/// Next occurrence of a `birthday` value on or after `today`
fn next_birthday(value: &FrontmatterValue, today: NaiveDate) -> Option<NaiveDate> {
    let (month, day) = match value {
        FrontmatterValue::Date(date) => (date.month(), date.day()),
        FrontmatterValue::String(s) => match dates::parse_date(s) {
            Some(date) => (date.month(), date.day()),
            None => dates::parse_month_day(s)?,
        },
        _ => return None,
    };
    dates::next_anniversary(month, day, today)
}

/// Extract everything derivable from `content` without caching
pub fn extract(md: &MarkdownIt, content: &str, today: NaiveDate) -> ParsedContent {
    let parsed = parse_frontmatter(content);
    let ast = parse_ast(md, parsed.body);
    let (title, url) = title_and_url(&ast);

    let mut links = OrderedSet::default();
    let mut tags = OrderedSet::default();
    let mut found_dates = OrderedSet::default();

    for id in ast.iter() {
        match ast.kind(id) {
            NodeKind::Wikilink { id, .. } | NodeKind::Embed { id, .. } => {
                links.insert(id);
                if dates::is_date_string(id) {
                    found_dates.insert(id);
                }
            }
            NodeKind::Tag { name } => tags.insert_tag(name),
            _ => {}
        }
    }

    for (key, value) in parsed.frontmatter.iter() {
        match value {
            FrontmatterValue::Date(date) => found_dates.insert(&dates::format_date(*date)),
            _ if key == "tags" => frontmatter_tags(value, &mut tags),
            _ => {}
        }
    }

    if let Some(birthday) = parsed
        .frontmatter
        .get("birthday")
        .and_then(|value| next_birthday(value, today))
    {
        found_dates.insert(&dates::format_date(birthday));
    }

    let tasks = extract_tasks(&ast, parsed.body, parsed.body_offset);

    ParsedContent {
        title,
        url,
        frontmatter: parsed.frontmatter,
        tags: tags.0,
        dates: found_dates.0,
        links: links.0,
        tasks,
    }
}

fn display_name(id: &str, note_type: NoteType, title: &str) -> String {
    let derived = match note_type {
        NoteType::Daily => dates::parse_date(id).map(dates::display_date),
        NoteType::Weekly => dates::parse_week(id).map(|(year, week)| dates::display_week(year, week)),
        NoteType::Note | NoteType::Template => None,
    };
    derived.unwrap_or_else(|| if title.is_empty() { id.to_string() } else { title.to_string() })
}

/// Assemble a [`Note`] from extracted content
pub fn build_note(id: &str, content: &str, parsed: &ParsedContent) -> Note {
    let note_type = NoteType::derive(id, &parsed.frontmatter);
    let tasks = parsed
        .tasks
        .iter()
        .map(|task| Task {
            note_id: id.to_string(),
            note_type,
            ..task.clone()
        })
        .collect();

    Note {
        id: id.to_string(),
        content: content.to_string(),
        note_type,
        title: parsed.title.clone(),
        url: parsed.url.clone(),
        display_name: display_name(id, note_type, &parsed.title),
        frontmatter: parsed.frontmatter.clone(),
        tags: parsed.tags.clone(),
        dates: parsed.dates.clone(),
        links: parsed.links.clone(),
        tasks,
        backlinks: Vec::new(),
    }
}

/// Parses note content with the dialect plugins and memoizes the result
pub struct NoteParser {
    md: MarkdownIt,
    cache: ExtractionCache,
}

impl Default for NoteParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteParser {
    pub fn new() -> Self {
        Self::with_cache(ExtractionCache::default())
    }

    pub fn with_cache(cache: ExtractionCache) -> Self {
        Self {
            md: create_parser(),
            cache,
        }
    }

    pub fn from_config(config: &QuireConfig) -> Self {
        Self::with_cache(ExtractionCache::new(config.cache.capacity))
    }

    /// Extract content as of the local date
    pub fn parse_content(&self, content: &str) -> Arc<ParsedContent> {
        self.parse_content_on(content, Local::now().date_naive())
    }

    /// Extract content as of `today`, which anchors the derived birthday date
    pub fn parse_content_on(&self, content: &str, today: NaiveDate) -> Arc<ParsedContent> {
        self.cache
            .get_or_insert_with(content, today, || extract(&self.md, content, today))
    }

    pub fn parse_note(&self, id: &str, content: &str) -> Note {
        build_note(id, content, &self.parse_content(content))
    }

    pub fn parse_note_on(&self, id: &str, content: &str, today: NaiveDate) -> Note {
        build_note(id, content, &self.parse_content_on(content, today))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn parse(content: &str) -> ParsedContent {
        extract(&create_parser(), content, today())
    }

    #[test]
    fn test_title_is_first_level_one_heading() {
        let parsed = parse("## Sub\n\n# Main [[x|Ex]] #t\n\n# Second\n");
        assert_eq!(parsed.title, "Main Ex #t");
        assert_eq!(parsed.url, None);
    }

    #[test]
    fn test_title_link_sets_url() {
        let parsed = parse("# [Rust](https://www.rust-lang.org)\n");
        assert_eq!(parsed.title, "Rust");
        assert_eq!(parsed.url.as_deref(), Some("https://www.rust-lang.org"));

        let parsed = parse("# See [Rust](https://www.rust-lang.org)\n");
        assert_eq!(parsed.url, None);
    }

    #[test]
    fn test_links_tags_dates() {
        let parsed = parse("[[a]] ![[b]] [[a|again]] [[2024-01-01]]\n\n#x/y #z\n\n`[[code]]`\n");
        assert_eq!(parsed.links, vec!["a", "b", "2024-01-01"]);
        assert_eq!(parsed.tags, vec!["x", "x/y", "z"]);
        assert_eq!(parsed.dates, vec!["2024-01-01"]);
    }

    #[test]
    fn test_frontmatter_dates_and_tags() {
        let parsed = parse("---\ndue: 2024-02-01\ntags: [work/client, \"#home\"]\n---\nbody #work\n");
        assert_eq!(parsed.dates, vec!["2024-02-01"]);
        assert_eq!(parsed.tags, vec!["work", "work/client", "home"]);
    }

    #[test]
    fn test_birthday_forms() {
        let parsed = parse("---\nbirthday: 1990-03-10\n---\n");
        assert_eq!(parsed.dates, vec!["1990-03-10", "2025-03-10"]);

        let parsed = parse("---\nbirthday: \"07-04\"\n---\n");
        assert_eq!(parsed.dates, vec!["2024-07-04"]);

        let parsed = parse("---\nbirthday: \"06-15\"\n---\n");
        assert_eq!(parsed.dates, vec!["2024-06-15"]);
    }

    #[test]
    fn test_task_offsets_index_full_content() {
        let content = "---\na: 1\n---\n\n# T\n\n- [ ] first !!2 #p [[2024-01-03]]\n  - [x] nested #q\n";
        let parsed = parse(content);
        assert_eq!(parsed.tasks.len(), 2);

        let first = &parsed.tasks[0];
        assert!(content[first.start_offset..].starts_with("- [ ] first"));
        assert_eq!(first.priority, Some(2));
        assert_eq!(first.tags, vec!["p"]);
        assert_eq!(first.date.as_deref(), Some("2024-01-03"));
        assert_eq!(first.display_text, "first !!2 #p");

        let nested = &parsed.tasks[1];
        assert!(nested.completed);
        assert_eq!(nested.tags, vec!["q"]);
        assert!(content[nested.start_offset..].starts_with("- [x] nested"));
    }

    #[test]
    fn test_note_assembly() {
        let parser = NoteParser::new();
        let note = parser.parse_note_on("2024-01-01", "- [ ] a\n", today());
        assert_eq!(note.note_type, NoteType::Daily);
        assert_eq!(note.display_name, "Mon, Jan 1, 2024");
        assert_eq!(note.tasks[0].note_id, "2024-01-01");
        assert_eq!(note.tasks[0].note_type, NoteType::Daily);

        let note = parser.parse_note_on("ideas", "no title", today());
        assert_eq!(note.display_name, "ideas");

        let note = parser.parse_note_on("ideas", "# Big Ideas", today());
        assert_eq!(note.display_name, "Big Ideas");
    }

    #[test]
    fn test_parser_uses_cache() {
        let parser = NoteParser::new();
        parser.parse_content_on("# Same", today());
        parser.parse_content_on("# Same", today());
        let stats = parser.cache_stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }
}
