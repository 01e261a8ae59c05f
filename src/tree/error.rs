//! Error type for virtual file tree operations.
//!
//! Every failed operation leaves the forest exactly as it was; callers
//! decide which variants are user-facing (`DuplicateName` is surfaced for
//! correction, `NotFound` on delete is a silent no-op).

use thiserror::Error;

/// Errors produced by tree construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The path is empty or contains empty segments.
    #[error("invalid path {path:?}")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// The node name is empty or contains a slash.
    #[error("invalid name {name:?}: names must be non-empty and contain no '/'")]
    InvalidName {
        /// The offending name.
        name: String,
    },

    /// No folder exists at the requested parent path.
    #[error("no folder at {path:?}")]
    ParentNotFound {
        /// The parent path that failed to resolve.
        path: String,
    },

    /// The path resolves to a file where a folder is required.
    #[error("{path:?} is a file, not a folder")]
    NotAFolder {
        /// The path of the file node.
        path: String,
    },

    /// A sibling with the same name already exists.
    #[error("a file or folder named {name:?} already exists in {parent:?}")]
    DuplicateName {
        /// The parent path (empty string for the root level).
        parent: String,
        /// The colliding name.
        name: String,
    },

    /// No node carries the given id.
    #[error("no node with id {id:?}")]
    NotFound {
        /// The unresolved id.
        id: String,
    },

    /// The node is a folder and carries no content.
    #[error("{path:?} is a folder and has no content")]
    NotAFile {
        /// The path of the folder node.
        path: String,
    },
}
