//! sysver Deployment Engine
//!
//! Turns deployment reports into system versions and answers "what was live
//! at system version N".
//!
//! ## Architectural Boundaries
//!
//! - `sysver-registry` owns: the current service view, the deployment log,
//!   snapshot storage and id assignment
//! - `sysver-deployment` owns: deciding when a deployment changes the system,
//!   and projecting snapshots for readers
//! - `sysver-daemon` owns: input validation, authentication, HTTP mapping
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sysver_deployment::{DeploymentCoordinator, ServiceQuery};
//! use sysver_registry::{InMemoryDeploymentStore, InMemorySystemVersionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let deployments = Arc::new(InMemoryDeploymentStore::new());
//! let system_versions = Arc::new(InMemorySystemVersionStore::new());
//!
//! let coordinator = DeploymentCoordinator::new(deployments, system_versions.clone());
//! let query = ServiceQuery::new(system_versions);
//!
//! let response = coordinator.handle_deployment("api", 1).await?;
//! let services = query.get_services(response.system_version).await?;
//! assert_eq!(services.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod coordinator;
pub mod error;
pub mod query;

// Re-exports
pub use coordinator::DeploymentCoordinator;
pub use error::{DeploymentError, Result};
pub use query::ServiceQuery;
