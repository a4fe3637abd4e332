//! Embed plugin: `![[id]]`, `![[id|text]]`

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::syntax::scan_embed;

/// An embed. `text` falls back to `id` when the embed has no custom text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedNode {
    pub id: String,
    pub text: String,
}

impl NodeValue for EmbedNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("span", &[("class", "embed".to_string()), ("data-id", self.id.clone())]);
        fmt.text(&self.text);
        fmt.close("span");
    }
}

pub struct EmbedScanner;

impl InlineRule for EmbedScanner {
    const MARKER: char = '!';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let matched = scan_embed(input)?;

        let text = matched.text.unwrap_or_else(|| matched.id.clone());
        let node = Node::new(EmbedNode { id: matched.id, text });
        Some((node, matched.len))
    }
}

pub fn add_embed_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<EmbedScanner>().before_all();
}
