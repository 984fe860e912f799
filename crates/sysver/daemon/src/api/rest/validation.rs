//! Input validation for the public operations
//!
//! The core only ever sees a non-empty service name, a positive version and
//! a positive system version id. Everything else is rejected here.

use crate::error::{ApiError, FieldError};
use serde::Deserialize;
use serde_json::Value;
use sysver_types::{DeploymentRequest, SystemVersionId};

/// Deployment body as received, before any type checks
#[derive(Debug, Default, Deserialize)]
pub struct RawDeploymentRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub version: Option<Value>,
}

/// Query string of the services lookup
#[derive(Debug, Default, Deserialize)]
pub struct ServicesQuery {
    #[serde(rename = "systemVersion")]
    pub system_version: Option<String>,
}

/// Validate a deployment body, reporting every bad field at once
pub fn validate_deployment(raw: RawDeploymentRequest) -> Result<DeploymentRequest, ApiError> {
    let mut errors = Vec::new();

    let name = match raw.name {
        Some(Value::String(name)) if !name.is_empty() => Some(name),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            errors.push(FieldError::new("name", "Service name is required"));
            None
        }
        Some(_) => {
            errors.push(FieldError::new("name", "Service name must be a string"));
            None
        }
    };

    let version = match raw.version {
        Some(Value::Number(number)) => match whole_number(&number) {
            Some(version) if version > 0 => Some(version),
            _ => {
                errors.push(FieldError::new(
                    "version",
                    "Version must be a positive integer",
                ));
                None
            }
        },
        None | Some(Value::Null) => {
            errors.push(FieldError::new("version", "Version is required"));
            None
        }
        Some(_) => {
            errors.push(FieldError::new("version", "Version must be a number"));
            None
        }
    };

    match (name, version) {
        (Some(name), Some(version)) => Ok(DeploymentRequest { name, version }),
        _ => Err(ApiError::Validation(errors)),
    }
}

/// Largest integer a JSON client can send without losing precision
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Integer value of a JSON number, accepting floats such as `2.0`
fn whole_number(number: &serde_json::Number) -> Option<u64> {
    number.as_u64().or_else(|| {
        number
            .as_f64()
            .filter(|value| value.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(value))
            .map(|value| value as u64)
    })
}

/// Parse the `systemVersion` query parameter
pub fn parse_system_version(raw: Option<&str>) -> Result<SystemVersionId, ApiError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(ApiError::invalid(
            "systemVersion",
            "System version is required",
        ));
    }

    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(SystemVersionId::new(value)),
        _ => Err(ApiError::invalid(
            "systemVersion",
            "System version must be a positive integer",
        )),
    }
}
