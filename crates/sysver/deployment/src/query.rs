//! Read-only lookup of system versions

use crate::error::{DeploymentError, Result};
use std::sync::Arc;
use sysver_registry::SystemVersionStore;
use sysver_types::{ServiceVersion, SystemVersionId};

/// Answers "which services were live at system version N"
pub struct ServiceQuery {
    system_versions: Arc<dyn SystemVersionStore>,
}

impl ServiceQuery {
    pub fn new(system_versions: Arc<dyn SystemVersionStore>) -> Self {
        Self { system_versions }
    }

    /// Services recorded in the snapshot with exactly this id
    ///
    /// There is no "latest" shortcut here; pass
    /// [`current_system_version`](Self::current_system_version) explicitly.
    pub async fn get_services(&self, id: SystemVersionId) -> Result<Vec<ServiceVersion>> {
        let snapshot = self
            .system_versions
            .snapshot(id)
            .await?
            .ok_or(DeploymentError::SystemVersionNotFound(id))?;

        Ok(snapshot.services.iter().map(ServiceVersion::from).collect())
    }

    /// Id of the most recent snapshot, `NONE` before any deployment
    pub async fn current_system_version(&self) -> Result<SystemVersionId> {
        Ok(self.system_versions.current_id().await?)
    }
}
