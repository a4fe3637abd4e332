//! markdown-it host parser
//!
//! CommonMark parsing is delegated to markdown-it; the note dialect is added
//! as inline plugins and the result is converted into the arena [`Ast`].

pub mod converter;
pub mod plugins;

pub use converter::AstConverter;

use markdown_it::MarkdownIt;

use crate::ast::Ast;

/// A CommonMark parser with the note dialect installed
pub fn create_parser() -> MarkdownIt {
    let mut md = MarkdownIt::new();
    markdown_it::plugins::cmark::add(&mut md);
    plugins::add_note_plugins(&mut md);
    md
}

/// Parse `source` into an [`Ast`] with `md`
pub fn parse_ast(md: &MarkdownIt, source: &str) -> Ast {
    AstConverter::convert(&md.parse(source))
}
