//! Service state, deployment log and system version snapshots

use crate::SystemVersionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A service and the version it is currently at
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceState {
    /// Service name, never empty
    pub name: String,

    /// Deployed version, always positive
    pub version: u64,
}

impl ServiceState {
    pub fn new(name: impl Into<String>, version: u64) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// One entry of the deployment log
///
/// Records are appended for every deployment call, including redeploys of
/// an unchanged version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub name: String,
    pub version: u64,
    pub recorded_at: DateTime<Utc>,
}

impl DeploymentRecord {
    /// Create a record stamped with the current time
    pub fn now(name: impl Into<String>, version: u64) -> Self {
        Self {
            name: name.into(),
            version,
            recorded_at: Utc::now(),
        }
    }
}

/// Immutable copy of every tracked service at the moment a version changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemVersionSnapshot {
    /// Snapshot id
    pub id: SystemVersionId,

    /// One entry per service, in the order services were first deployed
    pub services: Vec<ServiceState>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
