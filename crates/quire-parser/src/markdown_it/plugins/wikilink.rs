//! Wikilink plugin: `[[id]]`, `[[id|text]]`

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::syntax::scan_wikilink;

/// A wikilink. `text` is empty when the link has no custom text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikilinkNode {
    pub id: String,
    pub text: String,
}

impl NodeValue for WikilinkNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        let label = if self.text.is_empty() { &self.id } else { &self.text };
        fmt.open("a", &[("class", "wikilink".to_string()), ("href", self.id.clone())]);
        fmt.text(label);
        fmt.close("a");
    }
}

pub struct WikilinkScanner;

impl InlineRule for WikilinkScanner {
    const MARKER: char = '[';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let matched = scan_wikilink(input)?;

        let node = Node::new(WikilinkNode {
            id: matched.id,
            text: matched.text.unwrap_or_default(),
        });
        Some((node, matched.len))
    }
}

/// Ahead of the link rule so `[[x]]` is never read as a bracketed link
pub fn add_wikilink_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<WikilinkScanner>().before_all();
}
