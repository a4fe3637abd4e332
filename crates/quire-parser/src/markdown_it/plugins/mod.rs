//! markdown-it plugins for the inline note dialect
//!
//! Each plugin wraps one state machine from [`crate::syntax`] in an
//! [`InlineRule`](markdown_it::parser::inline::InlineRule). Code spans and
//! fenced code never reach inline rules, so the dialect is inert there.

pub mod embed;
pub mod priority;
pub mod tag;
pub mod wikilink;

pub use embed::{add_embed_plugin, EmbedNode};
pub use priority::{add_priority_plugin, PriorityNode};
pub use tag::{add_tag_plugin, TagNode};
pub use wikilink::{add_wikilink_plugin, WikilinkNode};

use markdown_it::MarkdownIt;

/// Install every dialect plugin.
///
/// Embeds go in first so that neither the image rule nor the priority rule
/// sees the `!` of `![[...]]`.
pub fn add_note_plugins(md: &mut MarkdownIt) {
    add_priority_plugin(md);
    add_tag_plugin(md);
    add_wikilink_plugin(md);
    add_embed_plugin(md);
}
