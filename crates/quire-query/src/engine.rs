//! Query evaluation over note and task collections

use std::sync::Arc;

use chrono::NaiveDate;
use quire_core::{Filter, Note, Query, Sort, Task};
use tracing::debug;

use crate::filter::{note_filters, task_filters, FilterContext, FilterRegistry};
use crate::fuzzy::{fuzzy_search, FuzzyIndex, NucleoFuzzyIndex, Searchable};
use crate::relative::{BasicDatePhrases, DatePhraseResolver, RelativeDates};
use crate::sort::{note_sorts, task_sorts, SortRegistry};

/// Evaluates parsed queries.
///
/// Holds the filter and sort registries plus the fuzzy index and date
/// resolver. Build one per dataset snapshot and reuse it across queries.
pub struct QueryEngine {
    fuzzy: Arc<dyn FuzzyIndex>,
    dates: RelativeDates,
    note_filters: FilterRegistry<Note>,
    task_filters: FilterRegistry<Task>,
    note_sorts: SortRegistry<Note>,
    task_sorts: SortRegistry<Task>,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> QueryEngineBuilder {
        QueryEngineBuilder::default()
    }

    pub fn dates(&self) -> &RelativeDates {
        &self.dates
    }

    /// Notes passing every filter, in input order
    pub fn filter_notes<'a>(&self, notes: &'a [Note], filters: &[Filter]) -> Vec<&'a Note> {
        self.note_filters.apply(notes.iter().collect(), filters, &self.dates)
    }

    /// Tasks passing every filter, in input order
    pub fn filter_tasks<'a>(&self, tasks: &'a [Task], filters: &[Filter]) -> Vec<&'a Task> {
        self.task_filters.apply(tasks.iter().collect(), filters, &self.dates)
    }

    pub fn sort_notes(&self, notes: &mut [&Note], sorts: &[Sort]) {
        self.note_sorts.sort(notes, sorts);
    }

    pub fn sort_tasks(&self, tasks: &mut [&Task], sorts: &[Sort]) {
        self.task_sorts.sort(tasks, sorts);
    }

    /// Fuzzy search, then filters, then sorts.
    ///
    /// Without sorts the result keeps relevance order, or collection order
    /// when there is no fuzzy text.
    pub fn query_notes<'a>(&self, notes: &'a [Note], query: &Query) -> Vec<&'a Note> {
        let candidates = self.candidates(notes, &query.fuzzy);
        let mut matched = self.note_filters.apply(candidates, &query.filters, &self.dates);
        self.note_sorts.sort(&mut matched, &query.sorts);
        debug!(total = notes.len(), matched = matched.len(), "Evaluated note query");
        matched
    }

    /// Task counterpart of [`query_notes`](Self::query_notes)
    pub fn query_tasks<'a>(&self, tasks: &'a [Task], query: &Query) -> Vec<&'a Task> {
        let candidates = self.candidates(tasks, &query.fuzzy);
        let mut matched = self.task_filters.apply(candidates, &query.filters, &self.dates);
        self.task_sorts.sort(&mut matched, &query.sorts);
        debug!(total = tasks.len(), matched = matched.len(), "Evaluated task query");
        matched
    }

    fn candidates<'a, T: Searchable>(&self, items: &'a [T], fuzzy: &str) -> Vec<&'a T> {
        let all: Vec<&T> = items.iter().collect();
        if fuzzy.is_empty() {
            all
        } else {
            fuzzy_search(self.fuzzy.as_ref(), fuzzy, &all)
        }
    }
}

/// Builder for [`QueryEngine`]
pub struct QueryEngineBuilder {
    fuzzy: Arc<dyn FuzzyIndex>,
    resolver: Arc<dyn DatePhraseResolver>,
    today: Option<NaiveDate>,
    note_filters: FilterRegistry<Note>,
    task_filters: FilterRegistry<Task>,
}

impl Default for QueryEngineBuilder {
    fn default() -> Self {
        Self {
            fuzzy: Arc::new(NucleoFuzzyIndex),
            resolver: Arc::new(BasicDatePhrases),
            today: None,
            note_filters: note_filters(),
            task_filters: task_filters(),
        }
    }
}

impl QueryEngineBuilder {
    pub fn with_fuzzy_index(mut self, index: impl FuzzyIndex + 'static) -> Self {
        self.fuzzy = Arc::new(index);
        self
    }

    pub fn with_date_resolver(mut self, resolver: impl DatePhraseResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Fix "today" for relative dates; defaults to the local date at build time
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Add or replace a note filter key
    pub fn with_note_filter<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Note, &str, &FilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.note_filters.register(key, predicate);
        self
    }

    /// Add or replace a task filter key
    pub fn with_task_filter<F>(mut self, key: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Task, &str, &FilterContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.task_filters.register(key, predicate);
        self
    }

    pub fn build(self) -> QueryEngine {
        let dates = match self.today {
            Some(today) => RelativeDates::new(self.resolver, today),
            None => RelativeDates::new(self.resolver, chrono::Local::now().date_naive()),
        };
        QueryEngine {
            fuzzy: self.fuzzy,
            dates,
            note_filters: self.note_filters,
            task_filters: self.task_filters,
            note_sorts: note_sorts(),
            task_sorts: task_sorts(),
        }
    }
}
