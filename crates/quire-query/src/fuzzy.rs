//! Fuzzy text search over notes and tasks.
//!
//! A [`FuzzyIndex`] ranks candidates, each described by a few text fields,
//! against the free-text part of a query. The default implementation uses
//! nucleo's matcher.

use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};
use quire_core::{Note, Task};

/// Text fields a record is searched by
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Note {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.display_name.as_str(), self.id.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }
}

impl Searchable for Task {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.display_text.as_str()]
    }
}

/// Ranks candidates against a query
pub trait FuzzyIndex: Send + Sync {
    /// Indices of matching candidates, best match first.
    ///
    /// Each candidate is a list of fields; a candidate matches if any field does.
    fn rank(&self, query: &str, candidates: &[Vec<&str>]) -> Vec<usize>;
}

/// [`FuzzyIndex`] backed by nucleo-matcher (case-insensitive, smart normalization)
#[derive(Debug, Clone, Copy, Default)]
pub struct NucleoFuzzyIndex;

impl FuzzyIndex for NucleoFuzzyIndex {
    fn rank(&self, query: &str, candidates: &[Vec<&str>]) -> Vec<usize> {
        let mut matcher = Matcher::new(Config::DEFAULT);
        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut buf = Vec::new();

        let mut scored: Vec<(usize, u32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                fields
                    .iter()
                    .filter_map(|field| pattern.score(Utf32Str::new(field, &mut buf), &mut matcher))
                    .max()
                    .map(|score| (index, score))
            })
            .collect();

        // Stable: equal scores keep collection order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(index, _)| index).collect()
    }
}

/// Run `query` through `index` and return the matching items in rank order
pub fn fuzzy_search<'a, T: Searchable>(index: &dyn FuzzyIndex, query: &str, items: &[&'a T]) -> Vec<&'a T> {
    let candidates: Vec<Vec<&str>> = items.iter().map(|item| item.search_fields()).collect();
    index
        .rank(query, &candidates)
        .into_iter()
        .filter_map(|i| items.get(i).copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_orders_by_score() {
        let candidates = vec![vec!["grocery list"], vec!["meeting notes"], vec!["meet"], vec!["unrelated"]];
        let ranked = NucleoFuzzyIndex.rank("meet", &candidates);
        assert!(!ranked.contains(&3));
        assert!(!ranked.contains(&0));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_any_field_matches() {
        let candidates = vec![vec!["Title", "projects/alpha"], vec!["Other", "misc"]];
        assert_eq!(NucleoFuzzyIndex.rank("alpha", &candidates), vec![0]);
    }

    #[test]
    fn test_case_insensitive() {
        let candidates = vec![vec!["Weekly Review"]];
        assert_eq!(NucleoFuzzyIndex.rank("weekly", &candidates), vec![0]);
    }
}
