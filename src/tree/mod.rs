//! The virtual file tree: a client-side project model for generated code.
//!
//! A generation reply arrives as a flat list of file records; [`build`]
//! folds it into a nested tree of file and folder nodes, [`Forest`] keeps
//! the tree consistent under create, rename, delete and content edits, and
//! [`flatten`] walks it back out to flat `{path, content}` pairs for
//! export.
//!
//! Invariants maintained by every operation:
//!
//! 1. No two nodes share a path.
//! 2. A node's path is its parent's path plus its own name.
//! 3. Every non-final path segment is a folder.
//! 4. Siblings order folders before files, names in case-sensitive order.
//! 5. Only folders have children (by construction of [`Node`]).

pub mod build;
pub mod error;
pub mod flatten;
pub mod forest;
pub mod node;
pub mod path;

pub use build::{build_forest, merge_records, FileRecord, MergeOutcome};
pub use error::TreeError;
pub use flatten::{flatten, FlatFile};
pub use forest::Forest;
pub use node::{FileNode, FolderNode, Node, NodeKind};
