//! Deployment error types

use sysver_types::SystemVersionId;
use thiserror::Error;

/// Deployment errors
#[derive(Debug, Error)]
pub enum DeploymentError {
    #[error("System version {0} not found")]
    SystemVersionNotFound(SystemVersionId),

    #[error("Registry error: {0}")]
    Registry(#[from] sysver_registry::RegistryError),
}

impl DeploymentError {
    /// Whether the process should stop serving after this error
    pub fn is_fatal(&self) -> bool {
        match self {
            DeploymentError::SystemVersionNotFound(_) => false,
            DeploymentError::Registry(e) => e.is_fatal(),
        }
    }
}

/// Result type for deployment operations
pub type Result<T> = std::result::Result<T, DeploymentError>;
