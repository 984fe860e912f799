//! In-memory implementations of the store traits
//!
//! These keep everything for the lifetime of the process. Nothing is ever
//! evicted: the deployment log and the snapshot map only grow.

use crate::deployment::DeploymentStore;
use crate::error::{RegistryError, Result};
use crate::system_version::SystemVersionStore;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use sysver_types::{DeploymentRecord, ServiceState, SystemVersionId, SystemVersionSnapshot};
use tokio::sync::RwLock;

/// Current view: name index into a first-seen ordered list
#[derive(Debug, Default)]
struct CurrentView {
    positions: HashMap<String, usize>,
    services: Vec<ServiceState>,
}

/// In-memory deployment store
#[derive(Debug, Default)]
pub struct InMemoryDeploymentStore {
    current: RwLock<CurrentView>,
    history: RwLock<Vec<DeploymentRecord>>,
}

impl InMemoryDeploymentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeploymentStore for InMemoryDeploymentStore {
    async fn current_services(&self) -> Result<Vec<ServiceState>> {
        let current = self.current.read().await;
        Ok(current.services.clone())
    }

    async fn version_of(&self, name: &str) -> Result<Option<u64>> {
        let current = self.current.read().await;
        Ok(current
            .positions
            .get(name)
            .map(|&pos| current.services[pos].version))
    }

    async fn set_version(&self, name: &str, version: u64) -> Result<()> {
        let mut guard = self.current.write().await;
        let current = &mut *guard;
        match current.positions.get(name) {
            Some(&pos) => current.services[pos].version = version,
            None => {
                current.positions.insert(name.to_string(), current.services.len());
                current.services.push(ServiceState::new(name, version));
            }
        }
        Ok(())
    }

    async fn append(&self, record: DeploymentRecord) -> Result<()> {
        let mut history = self.history.write().await;
        history.push(record);
        Ok(())
    }

    async fn history(&self) -> Result<Vec<DeploymentRecord>> {
        let history = self.history.read().await;
        Ok(history.clone())
    }

    async fn service_count(&self) -> Result<usize> {
        let current = self.current.read().await;
        Ok(current.services.len())
    }

    async fn deployment_count(&self) -> Result<usize> {
        let history = self.history.read().await;
        Ok(history.len())
    }
}

/// Snapshot map and the id pointer, guarded together
#[derive(Debug, Default)]
struct SnapshotLog {
    current: SystemVersionId,
    snapshots: BTreeMap<SystemVersionId, SystemVersionSnapshot>,
}

/// In-memory system version store
#[derive(Debug, Default)]
pub struct InMemorySystemVersionStore {
    log: RwLock<SnapshotLog>,
}

impl InMemorySystemVersionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SystemVersionStore for InMemorySystemVersionStore {
    async fn current_id(&self) -> Result<SystemVersionId> {
        let log = self.log.read().await;
        Ok(log.current)
    }

    async fn create_snapshot(&self, services: &[ServiceState]) -> Result<SystemVersionId> {
        let mut log = self.log.write().await;
        let id = log.current.next();

        // The pointer must equal the number of snapshots, and the next id must be free.
        if log.snapshots.len() as u64 != log.current.get() || log.snapshots.contains_key(&id) {
            return Err(RegistryError::Inconsistent(format!(
                "pointer at {} with {} snapshots stored",
                log.current,
                log.snapshots.len()
            )));
        }

        let snapshot = SystemVersionSnapshot {
            id,
            services: services.to_vec(),
            created_at: chrono::Utc::now(),
        };
        log.snapshots.insert(id, snapshot);
        log.current = id;

        tracing::debug!(
            system_version = %id,
            services = services.len(),
            "Stored system version snapshot"
        );

        Ok(id)
    }

    async fn snapshot(&self, id: SystemVersionId) -> Result<Option<SystemVersionSnapshot>> {
        let log = self.log.read().await;
        Ok(log.snapshots.get(&id).cloned())
    }

    async fn all_snapshots(&self) -> Result<Vec<SystemVersionSnapshot>> {
        let log = self.log.read().await;
        Ok(log.snapshots.values().cloned().collect())
    }

    async fn snapshot_count(&self) -> Result<usize> {
        let log = self.log.read().await;
        Ok(log.snapshots.len())
    }
}
