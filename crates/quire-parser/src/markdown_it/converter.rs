//! Convert a markdown-it tree into the arena [`Ast`]

use markdown_it::parser::core::Root;
use markdown_it::parser::inline::Text;
use markdown_it::plugins::cmark::block::blockquote::Blockquote;
use markdown_it::plugins::cmark::block::code::CodeBlock;
use markdown_it::plugins::cmark::block::fence::CodeFence;
use markdown_it::plugins::cmark::block::heading::ATXHeading;
use markdown_it::plugins::cmark::block::list::{BulletList, ListItem, OrderedList};
use markdown_it::plugins::cmark::block::paragraph::Paragraph;
use markdown_it::plugins::cmark::inline::backticks::CodeInline;
use markdown_it::plugins::cmark::inline::link::Link;
use markdown_it::plugins::cmark::inline::newline::{Hardbreak, Softbreak};
use markdown_it::Node;

use super::plugins::{EmbedNode, PriorityNode, TagNode, WikilinkNode};
use crate::ast::{Ast, AstBuilder, NodeKind};

/// Converts markdown-it output to an [`Ast`]
pub struct AstConverter;

impl AstConverter {
    pub fn convert(root: &Node) -> Ast {
        let mut builder = AstBuilder::new();
        if root.is::<Root>() {
            for child in root.children.iter() {
                Self::walk_node(child, &mut builder);
            }
        } else {
            Self::walk_node(root, &mut builder);
        }
        builder.finish()
    }

    fn walk_node(node: &Node, builder: &mut AstBuilder) {
        let span = node.srcmap.as_ref().map(|pos| {
            let (start, end) = pos.get_byte_offsets();
            start..end
        });

        builder.enter(Self::kind_of(node), span);
        for child in node.children.iter() {
            Self::walk_node(child, builder);
        }
        builder.exit();
    }

    fn kind_of(node: &Node) -> NodeKind {
        // Dialect nodes first
        if let Some(link) = node.cast::<WikilinkNode>() {
            return NodeKind::Wikilink {
                id: link.id.clone(),
                text: link.text.clone(),
            };
        }
        if let Some(embed) = node.cast::<EmbedNode>() {
            return NodeKind::Embed {
                id: embed.id.clone(),
                text: embed.text.clone(),
            };
        }
        if let Some(tag) = node.cast::<TagNode>() {
            return NodeKind::Tag {
                name: tag.name.clone(),
            };
        }
        if let Some(priority) = node.cast::<PriorityNode>() {
            return NodeKind::Priority {
                level: priority.level,
            };
        }

        // CommonMark
        if let Some(text) = node.cast::<Text>() {
            return NodeKind::Text(text.content.clone());
        }
        if let Some(heading) = node.cast::<ATXHeading>() {
            return NodeKind::Heading {
                level: heading.level,
            };
        }
        if let Some(link) = node.cast::<Link>() {
            return NodeKind::Link {
                url: link.url.clone(),
            };
        }
        if let Some(fence) = node.cast::<CodeFence>() {
            return NodeKind::CodeBlock {
                content: fence.content.clone(),
            };
        }
        if let Some(code) = node.cast::<CodeBlock>() {
            return NodeKind::CodeBlock {
                content: code.content.clone(),
            };
        }
        if node.is::<Paragraph>() {
            NodeKind::Paragraph
        } else if node.is::<BulletList>() {
            NodeKind::List { ordered: false }
        } else if node.is::<OrderedList>() {
            NodeKind::List { ordered: true }
        } else if node.is::<ListItem>() {
            NodeKind::ListItem
        } else if node.is::<Blockquote>() {
            NodeKind::Blockquote
        } else if node.is::<CodeInline>() {
            NodeKind::Code
        } else if node.is::<Softbreak>() {
            NodeKind::SoftBreak
        } else if node.is::<Hardbreak>() {
            NodeKind::HardBreak
        } else {
            NodeKind::Other
        }
    }
}
