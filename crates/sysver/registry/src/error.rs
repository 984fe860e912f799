//! Registry error types

use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The snapshot counter no longer matches the stored snapshots.
    /// The store cannot be trusted after this.
    #[error("System version store is inconsistent: {0}")]
    Inconsistent(String),
}

impl RegistryError {
    /// Whether the error means an invariant is broken for good
    pub fn is_fatal(&self) -> bool {
        matches!(self, RegistryError::Inconsistent(_))
    }
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
