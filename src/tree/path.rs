//! Slash-delimited path handling for the virtual file tree.
//!
//! Paths are plain strings like `src/components/App.tsx` — no leading or
//! trailing slash, no empty segments. [`segments`] is the strict form used
//! by user-facing operations; [`normalize`] is the lenient form applied to
//! generator output before splitting.

use crate::tree::error::TreeError;

/// Splits a path into its ordered segments.
///
/// # Errors
///
/// Returns [`TreeError::InvalidPath`] when the path is empty, starts or
/// ends with a slash, or contains an empty segment (`a//b`).
pub fn segments(path: &str) -> Result<Vec<&str>, TreeError> {
    if path.is_empty() {
        return Err(TreeError::InvalidPath { path: path.to_string() });
    }
    let parts: Vec<&str> = path.split('/').collect();
    if parts.iter().any(|s| s.is_empty()) {
        return Err(TreeError::InvalidPath { path: path.to_string() });
    }
    Ok(parts)
}

/// Joins segments back into a path. Left inverse of [`segments`] for
/// inputs with no empty segments.
#[must_use]
pub fn join(segments: &[&str]) -> String {
    segments.join("/")
}

/// Appends `name` to `parent`, which may be empty for the root level.
#[must_use]
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Lenient cleanup for paths produced by the generator: trims whitespace
/// and stray slashes, drops empty segments. Returns `None` when nothing
/// usable survives.
#[must_use]
pub fn normalize(raw: &str) -> Option<String> {
    let cleaned: Vec<&str> =
        raw.trim().split('/').map(str::trim).filter(|s| !s.is_empty()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.join("/"))
    }
}
