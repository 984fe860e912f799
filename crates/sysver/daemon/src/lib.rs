//! sysver Daemon library
//!
//! This module provides the components of the sysver daemon:
//! - REST API handlers, authentication and input validation
//! - Configuration loading
//! - Server lifecycle management

pub mod api;
pub mod config;
pub mod error;
pub mod server;

pub use config::{DaemonConfig, Environment};
pub use error::{ApiError, DaemonError};
pub use server::Server;
