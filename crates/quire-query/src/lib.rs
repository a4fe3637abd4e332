//! Quire query language
//!
//! Parses query strings such as
//! `standup tag:work -tag:done date:>=today sort:date,priority` into a
//! [`Query`](quire_core::Query) and evaluates it against notes or tasks:
//!
//! ```
//! use quire_query::{parse_query, QueryEngine};
//!
//! let query = parse_query("tag:work sort:id");
//! let engine = QueryEngine::new();
//! let notes: Vec<quire_core::Note> = Vec::new();
//! assert!(engine.query_notes(&notes, &query).is_empty());
//! ```

pub mod collate;
pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod parse;
pub mod range;
pub mod relative;
pub mod sort;

pub use collate::collate;
pub use engine::{QueryEngine, QueryEngineBuilder};
pub use filter::{note_filters, task_filters, FilterContext, FilterRegistry, Predicate};
pub use fuzzy::{fuzzy_search, FuzzyIndex, NucleoFuzzyIndex, Searchable};
pub use parse::{parse_query, parse_sort};
pub use range::{is_in_range, Comparison};
pub use relative::{BasicDatePhrases, DatePhraseResolver, RelativeDates};
pub use sort::{note_sorts, task_sorts, Comparator, SortRegistry};
