//! System version store trait

use crate::error::Result;
use async_trait::async_trait;
use sysver_types::{ServiceState, SystemVersionId, SystemVersionSnapshot};

/// Store for immutable system version snapshots
#[async_trait]
pub trait SystemVersionStore: Send + Sync {
    /// Id of the latest snapshot, [`SystemVersionId::NONE`] before the first
    async fn current_id(&self) -> Result<SystemVersionId>;

    /// Copy `services` into a new snapshot and return its id
    ///
    /// The new id is always `current_id() + 1`. Ids are never skipped or
    /// reused.
    async fn create_snapshot(&self, services: &[ServiceState]) -> Result<SystemVersionId>;

    /// Snapshot with exactly this id
    async fn snapshot(&self, id: SystemVersionId) -> Result<Option<SystemVersionSnapshot>>;

    /// All snapshots in creation order
    async fn all_snapshots(&self) -> Result<Vec<SystemVersionSnapshot>>;

    /// Number of snapshots stored
    async fn snapshot_count(&self) -> Result<usize>;
}
