//! Parsed query shapes
//!
//! A [`Query`] is fuzzy text plus AND-combined [`Filter`]s plus ordered
//! [`Sort`] keys. Produced by `quire_query::parse_query`.

use serde::{Deserialize, Serialize};

/// A `key:value` qualifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub key: String,
    /// OR-combined values
    pub values: Vec<String>,
    /// Negates the whole filter
    pub exclude: bool,
}

impl Filter {
    pub fn new<K, V, I>(key: K, values: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = V>,
    {
        Self {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
            exclude: false,
        }
    }

    /// Same filter with `exclude` set
    pub fn excluded(mut self) -> Self {
        self.exclude = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction used when a sort key has no explicit direction
    pub fn default_for(key: &str) -> Self {
        match key {
            "tags" | "links" | "backlinks" | "updated_at" => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Coerce a direction literal: `desc` is descending, anything else ascending
    pub fn from_literal(literal: &str) -> Self {
        if literal.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub key: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// A parsed query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Free text left after qualifiers are removed
    pub fuzzy: String,
    pub filters: Vec<Filter>,
    pub sorts: Vec<Sort>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.fuzzy.is_empty() && self.filters.is_empty() && self.sorts.is_empty()
    }
}
