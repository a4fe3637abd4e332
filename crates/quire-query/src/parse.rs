//! Query string parsing
//!
//! A query is free text with `key:value` qualifiers mixed in:
//!
//! ```text
//! meeting tag:work,home -tag:done title:"q1, q2" sort:date:desc,id
//! ```
//!
//! Qualifiers become [`Filter`]s, except `sort:` which becomes [`Sort`]s.
//! Whatever text remains, with whitespace runs collapsed, is the fuzzy
//! search input. Parsing never fails.

use std::sync::LazyLock;

use quire_core::{Filter, Query, Sort, SortDirection};
use regex::Regex;

static QUALIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(-?)(\w[\w-]*):("[^"]*"|[^\s"]+)"#).expect("qualifier regex")
});

const SORT_KEY: &str = "sort";

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn unquote(raw: &str) -> Option<&str> {
    raw.strip_prefix('"')?.strip_suffix('"')
}

/// Parse a sort qualifier value such as `title,id:desc`
pub fn parse_sort(value: &str) -> Vec<Sort> {
    let value = unquote(value).unwrap_or(value);
    split_list(value)
        .into_iter()
        .filter_map(|item| {
            let (key, direction) = match item.split_once(':') {
                Some((key, literal)) => (key.trim(), Some(literal)),
                None => (item.as_str(), None),
            };
            if key.is_empty() {
                return None;
            }
            let direction = direction.map_or_else(|| SortDirection::default_for(key), SortDirection::from_literal);
            Some(Sort::new(key, direction))
        })
        .collect()
}

/// Parse a query string
pub fn parse_query(input: &str) -> Query {
    let mut query = Query::default();
    let mut fuzzy = String::with_capacity(input.len());
    let mut last = 0;

    for caps in QUALIFIER.captures_iter(input) {
        let (Some(whole), Some(key), Some(value)) = (caps.get(0), caps.get(2), caps.get(3)) else {
            continue;
        };
        fuzzy.push_str(&input[last..whole.start()]);
        last = whole.end();

        let key = key.as_str();
        let value = value.as_str();
        if key == SORT_KEY {
            query.sorts.extend(parse_sort(value));
            continue;
        }

        let values = match unquote(value) {
            Some(phrase) => vec![phrase.to_string()],
            None => split_list(value),
        };
        if values.is_empty() {
            continue;
        }

        let filter = Filter::new(key, values);
        let exclude = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        query.filters.push(if exclude { filter.excluded() } else { filter });
    }

    fuzzy.push_str(&input[last..]);
    query.fuzzy = fuzzy.split_whitespace().collect::<Vec<_>>().join(" ");
    query
}
