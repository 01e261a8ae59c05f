//! Export surface: writes the in-memory project to disk.
//!
//! The bundle export preserves every file's full path under the target
//! directory; the single-file export writes one blob named after the node.
//! Path collisions inside the bundle are impossible — the forest keeps
//! paths unique.

use std::path::{Path, PathBuf};

use crate::ports::filesystem::FileSystem;
use crate::tree::flatten::flatten;
use crate::tree::node::FileNode;
use crate::tree::Forest;

/// Writes every file in the forest under `dir`, preserving paths.
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an error naming the first entry that failed to write.
pub fn write_bundle(fs: &dyn FileSystem, forest: &Forest, dir: &Path) -> Result<usize, String> {
    let entries = flatten(forest);
    for entry in &entries {
        let target = dir.join(&entry.path);
        fs.write(&target, &entry.content)
            .map_err(|e| format!("failed to write {}: {e}", target.display()))?;
    }
    Ok(entries.len())
}

/// Writes one file node into `dir` under its own name (not its full path)
/// and returns the written path.
///
/// # Errors
///
/// Returns an error when the write fails.
pub fn write_file(fs: &dyn FileSystem, file: &FileNode, dir: &Path) -> Result<PathBuf, String> {
    let target = dir.join(&file.name);
    fs.write(&target, &file.content)
        .map_err(|e| format!("failed to write {}: {e}", target.display()))?;
    Ok(target)
}
