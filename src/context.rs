//! Service context bundling all port trait objects.

use crate::adapters::live::{LiveFileSystem, LiveGenerationClient, LiveIdGenerator};
use crate::ports::filesystem::FileSystem;
use crate::ports::generator::GenerationClient;
use crate::ports::id_gen::IdGenerator;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Tests construct
/// the struct directly with in-memory doubles.
pub struct ServiceContext {
    /// Generation client for model completions.
    pub generator: Box<dyn GenerationClient>,
    /// ID generator for tree node identifiers.
    pub ids: Box<dyn IdGenerator>,
    /// Filesystem for the export surface.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self {
            generator: Box::new(LiveGenerationClient::new()),
            ids: Box::new(LiveIdGenerator::new()),
            fs: Box::new(LiveFileSystem),
        }
    }
}
