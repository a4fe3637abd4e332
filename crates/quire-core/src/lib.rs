//! Quire core data model
//!
//! Shared types for the Quire note system:
//! - `Note` / `Task` records derived from markdown content
//! - `Frontmatter` as an ordered key/value map
//! - `Filter` / `Sort` / `Query` shapes produced by the query parser
//! - Configuration loading
//!
//! Records here are pure data. Parsing lives in `quire-parser`, evaluation in
//! `quire-query`.

pub mod config;
pub mod dates;
pub mod error;
pub mod frontmatter;
pub mod note;
pub mod query;

pub use config::{
    CacheConfig, FrontmatterConfig, QueryConfig, QuireConfig, TransclusionConfig,
    DEFAULT_RESERVED_KEYS,
};
pub use error::{ConfigError, ConfigResult};
pub use frontmatter::{Frontmatter, FrontmatterValue};
pub use note::{attach_backlinks, Note, NoteType, Task};
pub use query::{Filter, Query, Sort, SortDirection};
