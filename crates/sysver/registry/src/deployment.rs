//! Deployment store trait
//!
//! The DeploymentStore owns the current view (one version per service name)
//! and the append-only deployment log.

use crate::error::Result;
use async_trait::async_trait;
use sysver_types::{DeploymentRecord, ServiceState};

/// Store for the current service view and deployment history
#[async_trait]
pub trait DeploymentStore: Send + Sync {
    /// All tracked services, in the order each name was first set
    async fn current_services(&self) -> Result<Vec<ServiceState>>;

    /// Last recorded version of `name`, `None` if never deployed
    async fn version_of(&self, name: &str) -> Result<Option<u64>>;

    /// Overwrite the tracked version of `name`, inserting it if new
    async fn set_version(&self, name: &str, version: u64) -> Result<()>;

    /// Append a record to the deployment log
    async fn append(&self, record: DeploymentRecord) -> Result<()>;

    /// Full deployment log in insertion order
    async fn history(&self) -> Result<Vec<DeploymentRecord>>;

    /// Number of distinct services tracked
    async fn service_count(&self) -> Result<usize>;

    /// Number of records in the deployment log
    async fn deployment_count(&self) -> Result<usize>;
}
