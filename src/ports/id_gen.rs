//! ID generator port for minting tree node identifiers.

/// Mints unique identifiers for tree nodes.
///
/// Ids are opaque, stable for a node's lifetime, and never reused.
/// Abstracting the generator keeps creation sites free of ambient
/// randomness, so tests substitute a deterministic sequence.
pub trait IdGenerator: Send + Sync {
    /// Generates a new unique identifier string.
    fn generate_id(&self) -> String;
}
