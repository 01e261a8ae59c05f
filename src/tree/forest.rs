//! The forest: the single state container for a project's virtual file
//! tree.
//!
//! The forest owns the root-level node list; every operation keeps the tree
//! invariants intact (unique paths, parent-derived paths, folders-only
//! prefixes, sibling ordering). A failed operation leaves the forest
//! untouched.

use std::fmt::Write as _;

use crate::lang;
use crate::ports::IdGenerator;
use crate::tree::error::TreeError;
use crate::tree::node::{sort_siblings, FileNode, FolderNode, Node, NodeKind};
use crate::tree::path;

/// An ordered collection of root-level nodes forming a project tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    roots: Vec<Node>,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root-level nodes, in sibling order.
    #[must_use]
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub(crate) fn roots_mut(&mut self) -> &mut Vec<Node> {
        &mut self.roots
    }

    /// Returns `true` when the forest holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Counts the file nodes in the forest.
    #[must_use]
    pub fn file_count(&self) -> usize {
        fn count(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::File(_) => 1,
                    Node::Folder(d) => count(&d.children),
                })
                .sum()
        }
        count(&self.roots)
    }

    /// Finds a node by id, depth-first.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        find_in(&self.roots, id)
    }

    /// Resolves a full path to a node, or `None` when any segment is
    /// missing or an intermediate segment is a file.
    #[must_use]
    pub fn find_by_path(&self, target: &str) -> Option<&Node> {
        let segs = path::segments(target).ok()?;
        let (last, init) = segs.split_last()?;
        let mut current: &[Node] = &self.roots;
        for seg in init {
            current = current.iter().find(|n| n.name() == *seg)?.children()?;
        }
        current.iter().find(|n| n.name() == *last)
    }

    /// Creates a file or folder under `parent_path` (empty string for the
    /// root level) and returns the new node's id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] for empty or slash-containing
    /// names, [`TreeError::ParentNotFound`] / [`TreeError::NotAFolder`]
    /// when the parent does not resolve to a folder, and
    /// [`TreeError::DuplicateName`] when a sibling already uses the name.
    pub fn create_node(
        &mut self,
        parent_path: &str,
        name: &str,
        kind: NodeKind,
        ids: &dyn IdGenerator,
    ) -> Result<String, TreeError> {
        validate_name(name)?;
        let level = self.folder_children_mut(parent_path)?;
        if level.iter().any(|n| n.name() == name) {
            return Err(TreeError::DuplicateName {
                parent: parent_path.to_string(),
                name: name.to_string(),
            });
        }
        let id = ids.generate_id();
        let node_path = path::child_path(parent_path, name);
        let node = match kind {
            NodeKind::File => Node::File(FileNode {
                id: id.clone(),
                name: name.to_string(),
                path: node_path,
                content: String::new(),
                language: lang::language_for_path(name),
            }),
            NodeKind::Folder => Node::Folder(FolderNode {
                id: id.clone(),
                name: name.to_string(),
                path: node_path,
                expanded: true,
                children: Vec::new(),
            }),
        };
        level.push(node);
        sort_siblings(level);
        Ok(id)
    }

    /// Deletes the node with the given id and its entire subtree.
    ///
    /// Returns every removed id so the caller can clear stale references
    /// (e.g. a selection pointing into the removed subtree). An unknown id
    /// is a no-op and returns an empty list.
    pub fn delete_node(&mut self, id: &str) -> Vec<String> {
        match remove_by_id(&mut self.roots, id) {
            Some(removed) => {
                let mut ids = Vec::new();
                collect_ids(&removed, &mut ids);
                ids
            }
            None => Vec::new(),
        }
    }

    /// Replaces the content of the file with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::NotFound`] for an unknown id and
    /// [`TreeError::NotAFile`] when the id resolves to a folder.
    pub fn update_content(&mut self, id: &str, new_content: &str) -> Result<(), TreeError> {
        match find_mut_in(&mut self.roots, id) {
            Some(Node::File(f)) => {
                f.content = new_content.to_string();
                Ok(())
            }
            Some(Node::Folder(d)) => Err(TreeError::NotAFile { path: d.path.clone() }),
            None => Err(TreeError::NotFound { id: id.to_string() }),
        }
    }

    /// Renames the node with the given id, atomically rewriting its path
    /// and the path of every descendant, then re-sorting the level.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidName`] for a bad name,
    /// [`TreeError::NotFound`] for an unknown id, and
    /// [`TreeError::DuplicateName`] when a sibling already uses the name.
    pub fn rename_node(&mut self, id: &str, new_name: &str) -> Result<(), TreeError> {
        validate_name(new_name)?;
        let Some(level) = level_of_mut(&mut self.roots, id) else {
            return Err(TreeError::NotFound { id: id.to_string() });
        };
        let Some(idx) = level.iter().position(|n| n.id() == id) else {
            return Err(TreeError::NotFound { id: id.to_string() });
        };
        let parent = parent_path_of(level[idx].path());
        if level.iter().enumerate().any(|(i, n)| i != idx && n.name() == new_name) {
            return Err(TreeError::DuplicateName { parent, name: new_name.to_string() });
        }
        match &mut level[idx] {
            Node::File(f) => f.name = new_name.to_string(),
            Node::Folder(d) => d.name = new_name.to_string(),
        }
        rebase(&mut level[idx], &parent);
        sort_siblings(level);
        Ok(())
    }

    /// Flips the expanded presentation flag of the folder at `target` and
    /// returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::ParentNotFound`] when the path does not
    /// resolve and [`TreeError::NotAFolder`] when it resolves to a file.
    pub fn toggle_folder(&mut self, target: &str) -> Result<bool, TreeError> {
        let segs = path::segments(target)?;
        let (last, init) = segs
            .split_last()
            .ok_or_else(|| TreeError::InvalidPath { path: target.to_string() })?;
        let parent = path::join(init);
        let level = self.folder_children_mut(&parent)?;
        match level.iter_mut().find(|n| n.name() == *last) {
            Some(Node::Folder(d)) => {
                d.expanded = !d.expanded;
                Ok(d.expanded)
            }
            Some(Node::File(_)) => Err(TreeError::NotAFolder { path: target.to_string() }),
            None => Err(TreeError::ParentNotFound { path: target.to_string() }),
        }
    }

    /// Renders the forest as an indented outline for the terminal.
    /// Folders carry a trailing slash; collapsed folders elide their
    /// children.
    #[must_use]
    pub fn outline(&self) -> String {
        fn render(nodes: &[Node], depth: usize, out: &mut String) {
            for node in nodes {
                let indent = "  ".repeat(depth);
                match node {
                    Node::File(f) => {
                        let _ = writeln!(out, "{indent}{}", f.name);
                    }
                    Node::Folder(d) if d.expanded => {
                        let _ = writeln!(out, "{indent}{}/", d.name);
                        render(&d.children, depth + 1, out);
                    }
                    Node::Folder(d) => {
                        let _ = writeln!(out, "{indent}{}/ [+]", d.name);
                    }
                }
            }
        }
        if self.roots.is_empty() {
            return "(empty project)\n".to_string();
        }
        let mut out = String::new();
        render(&self.roots, 0, &mut out);
        out
    }

    /// Resolves `parent_path` ("" for the root) to the mutable child list
    /// of an existing folder.
    fn folder_children_mut(&mut self, parent_path: &str) -> Result<&mut Vec<Node>, TreeError> {
        if parent_path.is_empty() {
            return Ok(&mut self.roots);
        }
        let segs = path::segments(parent_path)?;
        let mut current = &mut self.roots;
        let mut walked = String::new();
        for seg in segs {
            walked = path::child_path(&walked, seg);
            current = match current.iter_mut().find(|n| n.name() == seg) {
                Some(Node::Folder(d)) => &mut d.children,
                Some(Node::File(_)) => return Err(TreeError::NotAFolder { path: walked }),
                None => return Err(TreeError::ParentNotFound { path: walked }),
            };
        }
        Ok(current)
    }
}

/// The parent portion of a path, empty for a root-level path.
fn parent_path_of(node_path: &str) -> String {
    node_path.rsplit_once('/').map_or(String::new(), |(parent, _)| parent.to_string())
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name.contains('/') {
        return Err(TreeError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

/// Recomputes `node.path` from `parent_path` and the node's own name,
/// cascading through the subtree.
fn rebase(node: &mut Node, parent_path: &str) {
    let new_path = path::child_path(parent_path, node.name());
    match node {
        Node::File(f) => f.path = new_path,
        Node::Folder(d) => {
            d.path = new_path;
            let base = d.path.clone();
            for child in &mut d.children {
                rebase(child, &base);
            }
        }
    }
}

fn find_in<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder(d) = node {
            if let Some(found) = find_in(&d.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_mut_in<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Node> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Node::Folder(d) = node {
            if let Some(found) = find_mut_in(&mut d.children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Finds the sibling list that directly contains the node with `id`.
fn level_of_mut<'a>(nodes: &'a mut Vec<Node>, id: &str) -> Option<&'a mut Vec<Node>> {
    let here = nodes.iter().any(|n| n.id() == id);
    if here {
        return Some(nodes);
    }
    for node in nodes {
        if let Node::Folder(d) = node {
            if let Some(found) = level_of_mut(&mut d.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_by_id(nodes: &mut Vec<Node>, id: &str) -> Option<Node> {
    if let Some(pos) = nodes.iter().position(|n| n.id() == id) {
        return Some(nodes.remove(pos));
    }
    for node in nodes {
        if let Node::Folder(d) = node {
            if let Some(removed) = remove_by_id(&mut d.children, id) {
                return Some(removed);
            }
        }
    }
    None
}

fn collect_ids(node: &Node, out: &mut Vec<String>) {
    out.push(node.id().to_string());
    if let Node::Folder(d) = node {
        for child in &d.children {
            collect_ids(child, out);
        }
    }
}
