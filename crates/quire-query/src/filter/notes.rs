//! Note filter predicates

use quire_core::Note;

use super::{contains, tag_value, FilterContext, FilterRegistry};

/// `has:` / `no:` checks. Anything not listed is a frontmatter key.
fn note_has(note: &Note, what: &str) -> bool {
    match what {
        "backlink" | "backlinks" => !note.backlinks.is_empty(),
        "tag" | "tags" => !note.tags.is_empty(),
        "date" | "dates" => !note.dates.is_empty(),
        "link" | "links" => !note.links.is_empty(),
        "task" | "tasks" => !note.tasks.is_empty(),
        "title" => !note.title.is_empty(),
        key => note.frontmatter.contains_key(key),
    }
}

fn frontmatter_equals(note: &Note, value: &str, ctx: &FilterContext<'_>) -> bool {
    note.frontmatter
        .get(ctx.key)
        .is_some_and(|field| field.to_string() == value)
}

/// Registry with every note filter key
pub fn note_filters() -> FilterRegistry<Note> {
    FilterRegistry::new()
        .with("id", |note: &Note, value, _| note.id == value)
        .with("title", |note: &Note, value, _| {
            note.title.to_lowercase() == value.to_lowercase()
        })
        .with("type", |note: &Note, value, _| note.note_type.as_str() == value)
        .with("tag", |note: &Note, value, _| contains(&note.tags, tag_value(value)))
        .with("tags", |note: &Note, value, ctx| ctx.count_in_range(note.tags.len(), value))
        .with("date", |note: &Note, value, ctx| {
            note.dates.iter().any(|date| ctx.in_range(date, value))
        })
        .with("dates", |note: &Note, value, ctx| ctx.count_in_range(note.dates.len(), value))
        .with("link", |note: &Note, value, _| contains(&note.links, value))
        .with("links", |note: &Note, value, ctx| ctx.count_in_range(note.links.len(), value))
        .with("backlink", |note: &Note, value, _| contains(&note.backlinks, value))
        .with("backlinks", |note: &Note, value, ctx| {
            ctx.count_in_range(note.backlinks.len(), value)
        })
        .with("tasks", |note: &Note, value, ctx| {
            ctx.count_in_range(note.incomplete_tasks().count(), value)
        })
        .with("has", |note: &Note, value, _| note_has(note, value))
        .with("no", |note: &Note, value, _| !note_has(note, value))
        .with_fallback(frontmatter_equals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::RelativeDates;
    use quire_core::{Filter, Frontmatter, FrontmatterValue, NoteType, Task};

    fn note(id: &str) -> Note {
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
            links: Vec::new(),
            tasks: Vec::new(),
            backlinks: Vec::new(),
        }
    }

    fn task(completed: bool) -> Task {
        Task {
            note_id: String::new(),
            note_type: NoteType::Note,
            completed,
            text: String::new(),
            display_text: String::new(),
            links: Vec::new(),
            tags: Vec::new(),
            date: None,
            priority: None,
            start_offset: 0,
        }
    }

    fn check(note: &Note, filter: Filter) -> bool {
        let dates = RelativeDates::default();
        note_filters()
            .matches(&filter, note, &dates)
            .expect("note filters have a fallback")
    }

    #[test]
    fn test_tag_filters() {
        let mut n = note("a");
        n.tags = vec!["work".to_string(), "work/client".to_string()];
        assert!(check(&n, Filter::new("tag", ["work/client"])));
        assert!(check(&n, Filter::new("tag", ["#work"])));
        assert!(!check(&n, Filter::new("tag", ["client"])));
        assert!(check(&n, Filter::new("tags", [">1"])));
        assert!(!check(&n, Filter::new("tags", ["<2"])));
    }

    #[test]
    fn test_incomplete_task_count() {
        let mut n = note("a");
        n.tasks = vec![task(true), task(false), task(false)];
        assert!(check(&n, Filter::new("tasks", ["2"])));
        assert!(!check(&n, Filter::new("tasks", [">2"])));
    }

    #[test]
    fn test_has_and_no() {
        let mut n = note("a");
        n.backlinks = vec!["b".to_string()];
        n.frontmatter.insert("pinned", FrontmatterValue::Bool(true));

        assert!(check(&n, Filter::new("has", ["backlinks"])));
        assert!(check(&n, Filter::new("has", ["pinned"])));
        assert!(check(&n, Filter::new("no", ["tags"])));
        assert!(!check(&n, Filter::new("no", ["backlink"])));
        assert!(check(&n, Filter::new("no", ["backlink", "title"])));
    }

    #[test]
    fn test_frontmatter_fallback() {
        let mut n = note("a");
        n.frontmatter.insert("status", FrontmatterValue::from("active"));
        n.frontmatter.insert("rating", FrontmatterValue::Number(4.0));
        n.frontmatter.insert(
            "authors",
            FrontmatterValue::List(vec!["ann".into(), "bo".into()]),
        );

        assert!(check(&n, Filter::new("status", ["draft", "active"])));
        assert!(check(&n, Filter::new("rating", ["4"])));
        assert!(check(&n, Filter::new("authors", ["ann,bo"])));
        assert!(!check(&n, Filter::new("missing", ["x"])));
        assert!(check(&n, Filter::new("missing", ["x"]).excluded()));
    }

    #[test]
    fn test_type_and_title() {
        let mut n = note("2024-01-01");
        n.note_type = NoteType::Daily;
        n.title = "New Year".to_string();
        assert!(check(&n, Filter::new("type", ["daily"])));
        assert!(check(&n, Filter::new("title", ["new year"])));
        assert!(!check(&n, Filter::new("id", ["2024-01-02"])));
    }
}
