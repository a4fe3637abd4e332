//! Note and task ordering.
//!
//! Sorting is stable and multi-key: the first sort key that does not tie
//! decides. Keys without a comparator are skipped.

use std::cmp::Ordering;
use std::collections::HashMap;

use quire_core::{Note, Sort, SortDirection, Task};
use tracing::debug;

use crate::collate::collate;

/// Orders two records in the given direction
pub type Comparator<T> = Box<dyn Fn(&T, &T, SortDirection) -> Ordering + Send + Sync>;

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Compare optional values; `None` sorts last in both directions
fn nulls_last<V: Ord>(a: Option<V>, b: Option<V>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort comparators by key
pub struct SortRegistry<T> {
    comparators: HashMap<String, Comparator<T>>,
}

impl<T> Default for SortRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SortRegistry<T> {
    pub fn new() -> Self {
        Self {
            comparators: HashMap::new(),
        }
    }

    /// Register a comparator that ignores direction; descending reverses it
    pub fn with<F>(self, key: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        self.with_directed(key, move |a, b, direction| directed(compare(a, b), direction))
    }

    /// Register a comparator that handles direction itself
    pub fn with_directed<F>(mut self, key: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&T, &T, SortDirection) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.insert(key.into(), Box::new(compare));
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.comparators.contains_key(key)
    }

    /// Stable sort of `items` by `sorts`
    pub fn sort(&self, items: &mut [&T], sorts: &[Sort]) {
        let active: Vec<(&Comparator<T>, SortDirection)> = sorts
            .iter()
            .filter_map(|sort| {
                let comparator = self.comparators.get(&sort.key);
                if comparator.is_none() {
                    debug!(key = %sort.key, "Skipping unknown sort key");
                }
                comparator.map(|c| (c, sort.direction))
            })
            .collect();

        if active.is_empty() {
            return;
        }

        items.sort_by(|a, b| {
            active
                .iter()
                .map(|(compare, direction)| compare(*a, *b, *direction))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }
}

/// Registry with every note sort key
pub fn note_sorts() -> SortRegistry<Note> {
    SortRegistry::new()
        .with("id", |a: &Note, b: &Note| collate(&a.id, &b.id))
        .with("title", |a: &Note, b: &Note| collate(&a.display_name, &b.display_name))
        .with("tags", |a: &Note, b: &Note| a.tags.len().cmp(&b.tags.len()))
        .with("links", |a: &Note, b: &Note| a.links.len().cmp(&b.links.len()))
        .with("backlinks", |a: &Note, b: &Note| a.backlinks.len().cmp(&b.backlinks.len()))
        .with_directed("updated_at", |a: &Note, b: &Note, direction| {
            let updated = |note: &Note| note.frontmatter.get("updated_at").map(|v| v.to_string());
            nulls_last(updated(a), updated(b), direction)
        })
}

/// Registry with every task sort key
pub fn task_sorts() -> SortRegistry<Task> {
    SortRegistry::new()
        .with("completed", |a: &Task, b: &Task| a.completed.cmp(&b.completed))
        .with_directed("date", |a: &Task, b: &Task, direction| {
            nulls_last(a.date.as_deref(), b.date.as_deref(), direction)
        })
        .with_directed("priority", |a: &Task, b: &Task, direction| {
            nulls_last(a.priority, b.priority, direction)
        })
        .with("parent", |a: &Task, b: &Task| collate(&a.note_id, &b.note_id))
        .with("note", |a: &Task, b: &Task| collate(&a.note_id, &b.note_id))
        .with("text", |a: &Task, b: &Task| collate(&a.text, &b.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::NoteType;

    fn task(note_id: &str, date: Option<&str>, priority: Option<u8>, completed: bool) -> Task {
        Task {
            note_id: note_id.to_string(),
            note_type: NoteType::Note,
            completed,
            text: note_id.to_string(),
            display_text: note_id.to_string(),
            links: Vec::new(),
            tags: Vec::new(),
            date: date.map(str::to_string),
            priority,
            start_offset: 0,
        }
    }

    fn sorted<'a>(tasks: &'a [Task], sorts: &[Sort]) -> Vec<&'a str> {
        let mut refs: Vec<&Task> = tasks.iter().collect();
        task_sorts().sort(&mut refs, sorts);
        refs.iter().map(|t| t.note_id.as_str()).collect()
    }

    #[test]
    fn test_null_dates_last_both_directions() {
        let tasks = vec![
            task("none", None, None, false),
            task("early", Some("2024-01-01"), None, false),
            task("late", Some("2024-02-01"), None, false),
        ];
        assert_eq!(
            sorted(&tasks, &[Sort::new("date", SortDirection::Asc)]),
            vec!["early", "late", "none"]
        );
        assert_eq!(
            sorted(&tasks, &[Sort::new("date", SortDirection::Desc)]),
            vec!["late", "early", "none"]
        );
    }

    #[test]
    fn test_priority_then_parent() {
        let tasks = vec![
            task("c", None, Some(2), false),
            task("b", None, None, false),
            task("a", None, Some(2), false),
            task("d", None, Some(1), false),
        ];
        let sorts = [
            Sort::new("priority", SortDirection::Asc),
            Sort::new("parent", SortDirection::Asc),
        ];
        assert_eq!(sorted(&tasks, &sorts), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_incomplete_first() {
        let tasks = vec![task("done", None, None, true), task("open", None, None, false)];
        assert_eq!(
            sorted(&tasks, &[Sort::new("completed", SortDirection::Asc)]),
            vec!["open", "done"]
        );
    }

    #[test]
    fn test_unknown_keys_fall_through() {
        let tasks = vec![task("b", None, None, false), task("a", None, None, false)];
        let sorts = [
            Sort::new("mood", SortDirection::Asc),
            Sort::new("parent", SortDirection::Asc),
        ];
        assert_eq!(sorted(&tasks, &sorts), vec!["a", "b"]);
        assert_eq!(sorted(&tasks, &sorts[..1]), vec!["b", "a"]);
    }

    #[test]
    fn test_stable_on_ties() {
        let tasks = vec![
            task("x", Some("2024-01-01"), None, false),
            task("y", Some("2024-01-01"), None, false),
        ];
        assert_eq!(
            sorted(&tasks, &[Sort::new("date", SortDirection::Desc)]),
            vec!["x", "y"]
        );
    }
}
