//! Tag-tree construction for the marten parser.
//!
//! Consumes the token stream produced by `marten-markup` and assembles it
//! into a forest of nested nodes using an explicit open-element stack.
//!
//! # Design
//!
//! The tree is an arena: all nodes live in one vector in creation order,
//! which is exactly the pre-order/document-order traversal, and every
//! relationship is a [`NodeId`] index. The parent back-reference is therefore
//! non-owning; each node is owned only by the arena itself.
//!
//! # Leniency
//!
//! Unbalanced markup is tolerated, never reported:
//! - a closing tag pops whatever is on top of the stack; its name is not
//!   checked against the node being closed
//! - a closing tag with nothing open is ignored
//! - tags still open at end of input simply stay attached to their parents

use marten_markup::{AttributeList, Token, TokenKind};
use serde::Serialize;

/// A type-safe index into the tag tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub usize);

/// A single node of the tag tree.
///
/// Nodes are created one-to-one from non-closing tokens during the build
/// pass and never mutated afterwards. A [`TokenKind::ClosingTag`] token never
/// materializes as a node; it only pops the open-element stack.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// The kind of the token this node was built from.
    pub kind: TokenKind,
    /// The tag name, present only for tag nodes.
    pub tag: Option<String>,
    /// The scanned attributes, present only on tag nodes that had any.
    pub attributes: Option<AttributeList>,
    /// The text payload, present only for content and comment nodes.
    pub text: Option<String>,
    /// The node that was on top of the open-element stack when this node was
    /// created, or `None` for roots and doctype nodes.
    pub parent: Option<NodeId>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
}

/// An arena of [`Node`]s assembled from a token stream.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Tree {
    /// All nodes in creation order, which is pre-order over the forest.
    nodes: Vec<Node>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Build a tree from a token stream in a single left-to-right pass.
    ///
    /// Maintains a stack of currently open tag nodes; each new node is
    /// attached to the stack's top. Opening tags push, closing tags pop, and
    /// everything else becomes a leaf. Doctype declarations stand alone at
    /// the top level and never touch the stack.
    #[must_use]
    pub fn grow(tokens: Vec<Token>) -> Self {
        let mut tree = Self::new();
        let mut stack: Vec<NodeId> = Vec::new();

        for token in tokens {
            let parent = stack.last().copied();
            match token.kind {
                TokenKind::Doctype => {
                    let _ = tree.alloc(Node {
                        kind: token.kind,
                        tag: None,
                        attributes: None,
                        text: None,
                        parent: None,
                        children: Vec::new(),
                    });
                }
                TokenKind::OpenTag => {
                    let id = tree.alloc(Node {
                        kind: token.kind,
                        tag: token.tag_name,
                        attributes: token.attributes,
                        text: None,
                        parent,
                        children: Vec::new(),
                    });
                    tree.attach(parent, id);
                    stack.push(id);
                }
                TokenKind::AutoClosingTag => {
                    let id = tree.alloc(Node {
                        kind: token.kind,
                        tag: token.tag_name,
                        attributes: token.attributes,
                        text: None,
                        parent,
                        children: Vec::new(),
                    });
                    tree.attach(parent, id);
                }
                // Bogus comments get the same leaf treatment as comments.
                TokenKind::Content | TokenKind::Comment | TokenKind::BogusComment => {
                    let id = tree.alloc(Node {
                        kind: token.kind,
                        tag: None,
                        attributes: None,
                        text: Some(token.text),
                        parent,
                        children: Vec::new(),
                    });
                    tree.attach(parent, id);
                }
                // The popped node's tag is not compared against the closing
                // tag's name, and popping an empty stack is not an error.
                TokenKind::ClosingTag => {
                    let _ = stack.pop();
                }
            }
        }
        tree
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: Option<NodeId>, child: NodeId) {
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(child);
        }
    }

    /// Get a node by its id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// All nodes in pre-order (document order).
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The parent of a node, if it has one.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// The children of a node, in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// All top-level nodes (nodes with no parent), in document order.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterate over all nodes with their ids, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Concatenated text of every content node at or below `id`, in document
    /// order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        if node.kind == TokenKind::Content
            && let Some(text) = &node.text
        {
            out.push_str(text);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }
}

// =============================================================================
// Query Layer
// =============================================================================

impl Tree {
    /// The first node whose tag equals `tag` exactly, in document order.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.tag.as_deref() == Some(tag))
            .map(|(id, _)| id)
    }

    /// Every node whose tag equals `tag` exactly, in document order.
    #[must_use]
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.tag.as_deref() == Some(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// The first node carrying an attribute with exactly this key and value.
    #[must_use]
    pub fn find_by_attribute(&self, key: &str, value: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| has_attribute(node, key, value))
            .map(|(id, _)| id)
    }

    /// Every node carrying an attribute with exactly this key and value, in
    /// document order.
    #[must_use]
    pub fn find_all_by_attribute(&self, key: &str, value: &str) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| has_attribute(node, key, value))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Whether `node` carries an attribute matching `key` and `value` exactly.
/// Nodes without attributes never match.
fn has_attribute(node: &Node, key: &str, value: &str) -> bool {
    node.attributes.as_ref().is_some_and(|attributes| {
        attributes
            .iter()
            .any(|attribute| attribute.key == key && attribute.value == value)
    })
}

/// Print a tag tree for debugging, one node per line, indented by depth.
pub fn print_tree(tree: &Tree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match node.kind {
            TokenKind::Doctype => println!("{prefix}<!DOCTYPE>"),
            TokenKind::OpenTag | TokenKind::AutoClosingTag => {
                let tag = node.tag.as_deref().unwrap_or("");
                match &node.attributes {
                    None => println!("{prefix}<{tag}>"),
                    Some(attributes) => {
                        let rendered: Vec<String> = attributes
                            .iter()
                            .map(|attribute| {
                                if attribute.value.is_empty() {
                                    attribute.key.clone()
                                } else {
                                    format!("{}=\"{}\"", attribute.key, attribute.value)
                                }
                            })
                            .collect();
                        println!("{prefix}<{tag} {}>", rendered.join(" "));
                    }
                }
            }
            TokenKind::Content => {
                println!("{prefix}\"{}\"", node.text.as_deref().unwrap_or(""));
            }
            TokenKind::Comment | TokenKind::BogusComment => {
                println!("{prefix}{}", node.text.as_deref().unwrap_or(""));
            }
            // Closing tags never materialize as nodes.
            TokenKind::ClosingTag => {}
        }
        for &child in tree.children(id) {
            print_tree(tree, child, indent + 1);
        }
    }
}
