//! Tag plugin: `#tag`, `#nested/tag`

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::syntax::scan_tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagNode {
    pub name: String,
}

impl NodeValue for TagNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("span", &[("class", "tag".to_string())]);
        fmt.text(&format!("#{}", self.name));
        fmt.close("span");
    }
}

pub struct TagScanner;

impl InlineRule for TagScanner {
    const MARKER: char = '#';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let prev = state.src[..state.pos].chars().next_back();
        let input = &state.src[state.pos..state.pos_max];
        let matched = scan_tag(input, prev)?;

        Some((Node::new(TagNode { name: matched.name }), matched.len))
    }
}

pub fn add_tag_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<TagScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(input: &str) -> Vec<String> {
        fn walk(node: &Node, out: &mut Vec<String>) {
            if let Some(tag) = node.cast::<TagNode>() {
                out.push(tag.name.clone());
            }
            for child in node.children.iter() {
                walk(child, out);
            }
        }

        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_tag_plugin(&mut md);
        let mut out = Vec::new();
        walk(&md.parse(input), &mut out);
        out
    }

    #[test]
    fn test_tag_plugin() {
        assert_eq!(tags("#hello-world"), vec!["hello-world"]);
        assert_eq!(tags("one #a/b two #c"), vec!["a/b", "c"]);
    }

    #[test]
    fn test_heading_marker_is_not_a_tag() {
        assert_eq!(tags("# Title\n\nbody #real"), vec!["real"]);
    }

    #[test]
    fn test_mid_word_hash_is_text() {
        assert!(tags("issue#42 and C#").is_empty());
        assert!(tags("`#code`").is_empty());
    }
}
