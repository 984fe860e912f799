//! sysver Registry - Store traits and implementations
//!
//! This crate provides the two stores behind system version tracking:
//!
//! - **DeploymentStore**: latest version per service plus the deployment log
//! - **SystemVersionStore**: immutable snapshots keyed by a dense integer id
//!
//! ## In-Memory vs Persistent
//!
//! Only in-memory implementations exist. State lives as long as the process.
//! A persistent backend would implement the same traits.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod deployment;
pub mod error;
pub mod memory;
pub mod system_version;

// Re-exports
pub use deployment::DeploymentStore;
pub use error::{RegistryError, Result};
pub use memory::{InMemoryDeploymentStore, InMemorySystemVersionStore};
pub use system_version::SystemVersionStore;
