//! Filter evaluation.
//!
//! A [`FilterRegistry`] maps filter keys to predicates. A predicate checks a
//! single filter value against a record; the registry combines values with OR,
//! applies `exclude`, and ANDs filters together. Keys without a predicate go
//! to the registry's fallback, if it has one, and are skipped otherwise.

mod notes;
mod tasks;

pub use notes::note_filters;
pub use tasks::task_filters;

use std::collections::HashMap;

use quire_core::Filter;
use tracing::debug;

use crate::range::is_in_range;
use crate::relative::RelativeDates;

/// What a predicate sees besides the record and the value
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Key of the filter being evaluated
    pub key: &'a str,
    pub dates: &'a RelativeDates,
}

impl FilterContext<'_> {
    /// Range check for a count such as the number of tags
    pub fn count_in_range(&self, count: usize, condition: &str) -> bool {
        is_in_range(&count.to_string(), condition, self.dates)
    }

    pub fn in_range(&self, value: &str, condition: &str) -> bool {
        is_in_range(value, condition, self.dates)
    }
}

/// Checks one filter value against a record
pub type Predicate<T> = Box<dyn Fn(&T, &str, &FilterContext<'_>) -> bool + Send + Sync>;

/// Filter predicates by key
pub struct FilterRegistry<T> {
    predicates: HashMap<String, Predicate<T>>,
    fallback: Option<Predicate<T>>,
}

impl<T> Default for FilterRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FilterRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            predicates: HashMap::new(),
            fallback: None,
        }
    }

    /// Register a predicate, replacing any previous one for `key`
    pub fn register<F>(&mut self, key: impl Into<String>, predicate: F)
    where
        F: Fn(&T, &str, &FilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(key.into(), Box::new(predicate));
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&T, &str, &FilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.register(key, predicate);
        self
    }

    /// Predicate for keys with no registered predicate
    pub fn with_fallback<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T, &str, &FilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(predicate));
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.predicates.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.predicates.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    fn predicate(&self, key: &str) -> Option<&Predicate<T>> {
        self.predicates.get(key).or(self.fallback.as_ref())
    }

    /// Evaluate one filter. `None` when the key has no predicate.
    pub fn matches(&self, filter: &Filter, item: &T, dates: &RelativeDates) -> Option<bool> {
        let predicate = self.predicate(&filter.key)?;
        let ctx = FilterContext {
            key: &filter.key,
            dates,
        };
        let hit = filter.values.iter().any(|value| predicate(item, value.as_str(), &ctx));
        Some(hit != filter.exclude)
    }

    /// Keep the items that pass every filter, preserving order
    pub fn apply<'a>(&self, items: Vec<&'a T>, filters: &[Filter], dates: &RelativeDates) -> Vec<&'a T> {
        let active: Vec<&Filter> = filters
            .iter()
            .filter(|filter| {
                let known = self.predicate(&filter.key).is_some();
                if !known {
                    debug!(key = %filter.key, "Skipping filter with unknown key");
                }
                known
            })
            .collect();

        if active.is_empty() {
            return items;
        }

        items
            .into_iter()
            .filter(|item| {
                active
                    .iter()
                    .all(|filter| self.matches(filter, item, dates).unwrap_or(true))
            })
            .collect()
    }
}

/// Strip a leading `#` so `tag:#work` and `tag:work` mean the same
pub(crate) fn tag_value(value: &str) -> &str {
    value.strip_prefix('#').unwrap_or(value)
}

pub(crate) fn contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}
