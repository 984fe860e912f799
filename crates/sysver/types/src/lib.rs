//! sysver Types - Core types for system version tracking
//!
//! sysver records which version of each named service is deployed and folds
//! every change into a numbered, immutable "system version".
//!
//! ## Key Concepts
//!
//! - **ServiceState**: a service name and the version it is currently at
//! - **DeploymentRecord**: one entry of the append-only deployment log
//! - **SystemVersionSnapshot**: the full service set frozen under an id
//! - **SystemVersionId**: dense, strictly increasing snapshot id (0 = none yet)

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod api;
pub mod ids;
pub mod service;

// Re-export main types
pub use api::{DeploymentRequest, DeploymentResponse, ServiceVersion};
pub use ids::SystemVersionId;
pub use service::{DeploymentRecord, ServiceState, SystemVersionSnapshot};
