//! Arena syntax tree
//!
//! Nodes live in a flat `Vec` and reference their parent and children by
//! [`NodeId`]. Trees are built with [`AstBuilder`], which keeps a stack of
//! open parents while a walker pushes nodes in document order.

use std::ops::Range;

/// Index of a node in its [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading { level: u8 },
    Paragraph,
    List { ordered: bool },
    ListItem,
    Blockquote,
    /// Fenced or indented code
    CodeBlock { content: String },
    /// Inline code span
    Code,
    Text(String),
    Link { url: String },
    Wikilink { id: String, text: String },
    Embed { id: String, text: String },
    Tag { name: String },
    Priority { level: u8 },
    SoftBreak,
    HardBreak,
    /// Any construct the extractor does not look at
    Other,
}

impl NodeKind {
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Byte range in the parsed source, when the host parser reports one
    pub span: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<AstNode>,
}

impl Ast {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        &self.nodes[id.0]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Pre-order traversal of `id` and everything below it
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            ast: self,
            stack: vec![id],
            start: id,
            prune: None,
        }
    }

    /// Pre-order traversal that does not enter nodes rejected by `prune`.
    /// The start node itself is always visited.
    pub fn descendants_pruned<'a>(&'a self, id: NodeId, prune: fn(&NodeKind) -> bool) -> Descendants<'a> {
        Descendants {
            ast: self,
            stack: vec![id],
            start: id,
            prune: Some(prune),
        }
    }

    /// Ids of every node in document order
    pub fn iter(&self) -> Descendants<'_> {
        self.descendants(self.root())
    }

    /// Plain text of a subtree as a reader would see it.
    ///
    /// Wikilinks show their text (or id), embeds their text, tags and
    /// priorities their source form. Line breaks become spaces.
    pub fn plain_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.push_text(id, &mut out);
        out
    }

    fn push_text(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::CodeBlock { content } => out.push_str(content),
            NodeKind::Wikilink { id, text } if text.is_empty() => out.push_str(id),
            NodeKind::Wikilink { text, .. } | NodeKind::Embed { text, .. } => out.push_str(text),
            NodeKind::Tag { name } => {
                out.push('#');
                out.push_str(name);
            }
            NodeKind::Priority { level } => {
                out.push_str("!!");
                out.push_str(&level.to_string());
            }
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push(' '),
            _ => {
                for &child in self.children(id) {
                    self.push_text(child, out);
                }
            }
        }
    }
}

pub struct Descendants<'a> {
    ast: &'a Ast,
    stack: Vec<NodeId>,
    start: NodeId,
    prune: Option<fn(&NodeKind) -> bool>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let node = self.ast.node(id);
        let pruned = id != self.start && self.prune.is_some_and(|prune| prune(&node.kind));
        if !pruned {
            self.stack.extend(node.children.iter().rev().copied());
        }
        Some(id)
    }
}

/// Builds an [`Ast`] from enter/exit events
#[derive(Debug)]
pub struct AstBuilder {
    nodes: Vec<AstNode>,
    open: Vec<NodeId>,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    /// Start a tree with an open [`NodeKind::Document`] root
    pub fn new() -> Self {
        Self {
            nodes: vec![AstNode {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
                span: None,
            }],
            open: vec![NodeId(0)],
        }
    }

    fn push(&mut self, kind: NodeKind, span: Option<Range<usize>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(AstNode {
            kind,
            parent,
            children: Vec::new(),
            span,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Add a node under the current parent and make it the current parent
    pub fn enter(&mut self, kind: NodeKind, span: Option<Range<usize>>) -> NodeId {
        let id = self.push(kind, span);
        self.open.push(id);
        id
    }

    /// Close the current parent. The root is never closed.
    pub fn exit(&mut self) {
        if self.open.len() > 1 {
            self.open.pop();
        }
    }

    /// Add a childless node under the current parent
    pub fn leaf(&mut self, kind: NodeKind, span: Option<Range<usize>>) -> NodeId {
        self.push(kind, span)
    }

    pub fn finish(self) -> Ast {
        Ast { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ast {
        let mut builder = AstBuilder::new();
        builder.enter(NodeKind::Heading { level: 1 }, Some(0..9));
        builder.leaf(NodeKind::Text("Hi ".to_string()), None);
        builder.leaf(
            NodeKind::Wikilink {
                id: "a".to_string(),
                text: String::new(),
            },
            None,
        );
        builder.exit();
        builder.enter(NodeKind::List { ordered: false }, None);
        builder.enter(NodeKind::ListItem, Some(10..20));
        builder.leaf(NodeKind::Tag { name: "x".to_string() }, None);
        builder.enter(NodeKind::List { ordered: false }, None);
        builder.enter(NodeKind::ListItem, None);
        builder.leaf(NodeKind::Tag { name: "y".to_string() }, None);
        builder.finish()
    }

    #[test]
    fn test_builder_links_parents() {
        let ast = sample();
        let heading = ast.children(ast.root())[0];
        assert_eq!(ast.kind(heading), &NodeKind::Heading { level: 1 });
        for &child in ast.children(heading) {
            assert_eq!(ast.node(child).parent, Some(heading));
        }
        assert_eq!(ast.node(heading).span, Some(0..9));
    }

    #[test]
    fn test_plain_text() {
        let ast = sample();
        let heading = ast.children(ast.root())[0];
        assert_eq!(ast.plain_text(heading), "Hi a");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let ast = sample();
        let tags: Vec<_> = ast
            .iter()
            .filter_map(|id| match ast.kind(id) {
                NodeKind::Tag { name } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tags, vec!["x", "y"]);
    }

    #[test]
    fn test_pruned_descendants_skip_nested_lists() {
        let ast = sample();
        let item = ast
            .iter()
            .find(|&id| ast.kind(id) == &NodeKind::ListItem)
            .unwrap();
        let tags: Vec<_> = ast
            .descendants_pruned(item, NodeKind::is_list)
            .filter(|&id| matches!(ast.kind(id), NodeKind::Tag { .. }))
            .collect();
        assert_eq!(tags.len(), 1);
    }
}
