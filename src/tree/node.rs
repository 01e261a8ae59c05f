//! Node types for the virtual file tree.
//!
//! A node is either a file or a folder. The two kinds are separate structs
//! behind a tagged enum, so a file structurally cannot carry children and a
//! folder structurally cannot carry content — traversals match exhaustively
//! instead of checking a type field.

use std::cmp::Ordering;

/// The kind of a tree node. Fixed at creation; nodes are never converted
/// between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf carrying text content.
    File,
    /// An interior node carrying children.
    Folder,
}

/// A file node: a leaf with text content and a language tag.
#[derive(Debug, Clone, PartialEq)]
pub struct FileNode {
    /// Opaque unique identifier, stable for the node's lifetime.
    pub id: String,
    /// The node's own path segment (no slashes).
    pub name: String,
    /// Full slash-joined path from the forest root.
    pub path: String,
    /// Text payload.
    pub content: String,
    /// Descriptive language tag (e.g. `"typescript"`).
    pub language: String,
}

/// A folder node: an interior node owning an ordered list of children.
#[derive(Debug, Clone, PartialEq)]
pub struct FolderNode {
    /// Opaque unique identifier, stable for the node's lifetime.
    pub id: String,
    /// The node's own path segment (no slashes).
    pub name: String,
    /// Full slash-joined path from the forest root.
    pub path: String,
    /// Presentation hint: whether the folder renders expanded. Never a
    /// structural invariant; mutations tolerate either value.
    pub expanded: bool,
    /// Ordered children: folders before files, names in case-sensitive
    /// order within each kind.
    pub children: Vec<Node>,
}

/// A node in the virtual file tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A file leaf.
    File(FileNode),
    /// A folder with children.
    Folder(FolderNode),
}

impl Node {
    /// The node's unique id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Node::File(f) => &f.id,
            Node::Folder(d) => &d.id,
        }
    }

    /// The node's own path segment.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Folder(d) => &d.name,
        }
    }

    /// The node's full path from the forest root.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Node::File(f) => &f.path,
            Node::Folder(d) => &d.path,
        }
    }

    /// The node's kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File(_) => NodeKind::File,
            Node::Folder(_) => NodeKind::Folder,
        }
    }

    /// Children of a folder node, `None` for files.
    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::File(_) => None,
            Node::Folder(d) => Some(&d.children),
        }
    }
}

/// Sibling ordering: folders sort before files; within the same kind,
/// case-sensitive name order.
#[must_use]
pub fn sibling_order(a: &Node, b: &Node) -> Ordering {
    match (a, b) {
        (Node::Folder(_), Node::File(_)) => Ordering::Less,
        (Node::File(_), Node::Folder(_)) => Ordering::Greater,
        _ => a.name().cmp(b.name()),
    }
}

/// Sorts one sibling level in place per [`sibling_order`].
pub fn sort_siblings(nodes: &mut [Node]) {
    nodes.sort_by(sibling_order);
}
