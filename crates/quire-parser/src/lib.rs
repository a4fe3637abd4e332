//! Quire markdown parser
//!
//! The markdown dialect and document model of Quire notes:
//! - Inline syntax state machines for wikilinks, embeds, tags and priorities
//! - markdown-it plugins that bridge them into a CommonMark tree
//! - An arena AST the extractor walks
//! - Line-preserving frontmatter parsing and patching
//! - Note/task extraction with an LRU extraction cache
//! - Offset-based task mutation and recursive embed inlining

pub mod ast;
pub mod cache;
pub mod error;
pub mod extract;
pub mod frontmatter;
pub mod markdown_it;
pub mod syntax;
pub mod tasks;
pub mod transclude;

pub use ast::{Ast, AstBuilder, AstNode, NodeId, NodeKind};
pub use cache::{CacheStats, ExtractionCache, DEFAULT_CACHE_CAPACITY};
pub use error::{ParserError, ParserResult};
pub use extract::{build_note, extract, NoteParser, ParsedContent};
pub use frontmatter::{
    format_key, format_value, parse_frontmatter, rename_frontmatter_key, update_frontmatter,
    update_frontmatter_value, ParsedFrontmatter,
};
pub use crate::markdown_it::{create_parser, parse_ast};
pub use syntax::{tokenize, Token, TokenKind};
pub use tasks::{
    extract_tasks, remove_task, select_task_date, set_task_completed, toggle_task, update_task_text,
};
pub use transclude::{inline_embeds, DEFAULT_MAX_DEPTH};
