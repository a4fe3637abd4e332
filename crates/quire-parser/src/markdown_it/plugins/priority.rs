//! Priority plugin: `!!1`, `!!2`, `!!3`

use markdown_it::parser::inline::{InlineRule, InlineState};
use markdown_it::{MarkdownIt, Node, NodeValue, Renderer};

use crate::syntax::scan_priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityNode {
    pub level: u8,
}

impl NodeValue for PriorityNode {
    fn render(&self, _node: &Node, fmt: &mut dyn Renderer) {
        fmt.open("span", &[("class", format!("priority priority-{}", self.level))]);
        fmt.text(&format!("!!{}", self.level));
        fmt.close("span");
    }
}

pub struct PriorityScanner;

impl InlineRule for PriorityScanner {
    const MARKER: char = '!';

    fn run(state: &mut InlineState) -> Option<(Node, usize)> {
        let input = &state.src[state.pos..state.pos_max];
        let matched = scan_priority(input)?;

        Some((Node::new(PriorityNode { level: matched.level }), matched.len))
    }
}

pub fn add_priority_plugin(md: &mut MarkdownIt) {
    md.inline.add_rule::<PriorityScanner>().before_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(input: &str) -> Vec<u8> {
        fn walk(node: &Node, out: &mut Vec<u8>) {
            if let Some(priority) = node.cast::<PriorityNode>() {
                out.push(priority.level);
            }
            for child in node.children.iter() {
                walk(child, out);
            }
        }

        let mut md = MarkdownIt::new();
        markdown_it::plugins::cmark::add(&mut md);
        add_priority_plugin(&mut md);
        let mut out = Vec::new();
        walk(&md.parse(input), &mut out);
        out
    }

    #[test]
    fn test_priority_plugin() {
        assert_eq!(levels("Task !!2 with priority"), vec![2]);
        assert_eq!(levels("!!!1"), vec![1]);
        assert!(levels("!!4 and !!0").is_empty());
    }
}
