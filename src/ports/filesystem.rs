//! Filesystem port for the export surface.
//!
//! The forest itself lives only in memory; the disk is touched exclusively
//! when the user exports the project or downloads a single file.

use std::error::Error;
use std::path::Path;

/// Writes exported files to disk.
pub trait FileSystem: Send + Sync {
    /// Writes `contents` to `path`, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directories cannot be
    /// written.
    fn write(&self, path: &Path, contents: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
