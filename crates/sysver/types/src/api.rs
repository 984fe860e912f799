//! Input and output shapes of the two public operations

use crate::{ServiceState, SystemVersionId};
use serde::{Deserialize, Serialize};

/// Report that a service is now running a given version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
    pub name: String,
    pub version: u64,
}

impl DeploymentRequest {
    pub fn new(name: impl Into<String>, version: u64) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

/// Result of recording a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentResponse {
    pub system_version: SystemVersionId,
}

/// A `{name, version}` pair as returned by a system version lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceVersion {
    pub name: String,
    pub version: u64,
}

impl From<&ServiceState> for ServiceVersion {
    fn from(state: &ServiceState) -> Self {
        Self {
            name: state.name.clone(),
            version: state.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_uses_camel_case() {
        let response = DeploymentResponse {
            system_version: SystemVersionId::new(3),
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json, serde_json::json!({ "systemVersion": 3 }));
    }
}
