//! Task filter predicates

use quire_core::Task;

use super::{contains, tag_value, FilterRegistry};

fn task_has(task: &Task, what: &str) -> bool {
    match what {
        "date" | "dates" => task.date.is_some(),
        "priority" => task.priority.is_some(),
        "tag" | "tags" => !task.tags.is_empty(),
        "link" | "links" => !task.links.is_empty(),
        _ => false,
    }
}

fn owned_by(task: &Task, value: &str) -> bool {
    task.note_id == value
}

/// Registry with every task filter key. Unknown keys are skipped.
pub fn task_filters() -> FilterRegistry<Task> {
    FilterRegistry::new()
        .with("completed", |task: &Task, value, _| {
            value.parse::<bool>().is_ok_and(|completed| task.completed == completed)
        })
        .with("priority", |task: &Task, value, ctx| {
            task.priority
                .is_some_and(|priority| ctx.in_range(&priority.to_string(), value))
        })
        .with("tag", |task: &Task, value, _| contains(&task.tags, tag_value(value)))
        .with("tags", |task: &Task, value, ctx| ctx.count_in_range(task.tags.len(), value))
        .with("date", |task: &Task, value, ctx| {
            task.date.as_deref().is_some_and(|date| ctx.in_range(date, value))
        })
        .with("link", |task: &Task, value, _| contains(&task.links, value))
        .with("links", |task: &Task, value, ctx| ctx.count_in_range(task.links.len(), value))
        .with("parent", |task: &Task, value, _| owned_by(task, value))
        .with("note", |task: &Task, value, _| owned_by(task, value))
        .with("type", |task: &Task, value, _| task.note_type.as_str() == value)
        .with("has", |task: &Task, value, _| task_has(task, value))
        .with("no", |task: &Task, value, _| !task_has(task, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::{BasicDatePhrases, RelativeDates};
    use chrono::NaiveDate;
    use quire_core::{Filter, NoteType};
    use std::sync::Arc;

    fn task() -> Task {
        Task {
            note_id: "projects/web".to_string(),
            note_type: NoteType::Note,
            completed: false,
            text: "ship it !!1 [[2024-05-02]]".to_string(),
            display_text: "ship it !!1".to_string(),
            links: vec!["2024-05-02".to_string()],
            tags: Vec::new(),
            date: Some("2024-05-02".to_string()),
            priority: Some(1),
            start_offset: 0,
        }
    }

    fn check(task: &Task, filter: Filter) -> Option<bool> {
        let dates = RelativeDates::new(
            Arc::new(BasicDatePhrases),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        task_filters().matches(&filter, task, &dates)
    }

    #[test]
    fn test_completed() {
        let t = task();
        assert_eq!(check(&t, Filter::new("completed", ["false"])), Some(true));
        assert_eq!(check(&t, Filter::new("completed", ["true"])), Some(false));
        assert_eq!(check(&t, Filter::new("completed", ["maybe"])), Some(false));
    }

    #[test]
    fn test_priority_exact_and_range() {
        let t = task();
        assert_eq!(check(&t, Filter::new("priority", ["1"])), Some(true));
        assert_eq!(check(&t, Filter::new("priority", ["<=2"])), Some(true));
        assert_eq!(check(&t, Filter::new("priority", [">1"])), Some(false));

        let unprioritized = Task { priority: None, ..task() };
        assert_eq!(check(&unprioritized, Filter::new("priority", ["<=3"])), Some(false));
    }

    #[test]
    fn test_relative_date() {
        let t = task();
        assert_eq!(check(&t, Filter::new("date", ["tomorrow"])), Some(true));
        assert_eq!(check(&t, Filter::new("date", ["<=today"])), Some(false));
        assert_eq!(check(&t, Filter::new("date", [">today"])), Some(true));
    }

    #[test]
    fn test_parent_and_type() {
        let t = task();
        assert_eq!(check(&t, Filter::new("parent", ["projects/web"])), Some(true));
        assert_eq!(check(&t, Filter::new("note", ["projects/web"])), Some(true));
        assert_eq!(check(&t, Filter::new("type", ["daily"])), Some(false));
    }

    #[test]
    fn test_has_no() {
        let t = task();
        assert_eq!(check(&t, Filter::new("has", ["date"])), Some(true));
        assert_eq!(check(&t, Filter::new("no", ["tags"])), Some(true));
        assert_eq!(check(&t, Filter::new("has", ["title"])), Some(false));
    }

    #[test]
    fn test_unknown_key_has_no_predicate() {
        assert_eq!(check(&task(), Filter::new("status", ["open"])), None);
    }
}
