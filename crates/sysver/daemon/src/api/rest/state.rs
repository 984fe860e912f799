//! Application state for API handlers

use crate::config::Environment;
use crate::error::ApiError;
use std::sync::Arc;
use sysver_deployment::{DeploymentCoordinator, DeploymentError, ServiceQuery};
use tokio::sync::watch;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Deployment coordinator
    pub coordinator: Arc<DeploymentCoordinator>,

    /// System version lookups
    pub query: Arc<ServiceQuery>,

    /// Shared secret for the `/api` routes
    pub api_key: Arc<str>,

    /// Deployment environment
    pub environment: Environment,

    /// Daemon version
    pub version: String,

    /// Daemon start time
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// Graceful shutdown signal sender
    pub shutdown_tx: watch::Sender<bool>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        coordinator: Arc<DeploymentCoordinator>,
        query: Arc<ServiceQuery>,
        api_key: impl Into<Arc<str>>,
        environment: Environment,
        shutdown_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            coordinator,
            query,
            api_key: api_key.into(),
            environment,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: chrono::Utc::now(),
            shutdown_tx,
        }
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }

    /// Map a core error to an API error
    ///
    /// A fatal error also asks the server to shut down: the stores can no
    /// longer be trusted to hand out correct system versions.
    pub fn deployment_error(&self, err: DeploymentError) -> ApiError {
        if let DeploymentError::SystemVersionNotFound(id) = err {
            return ApiError::NotFound(format!("System version {} not found", id));
        }

        if err.is_fatal() {
            tracing::error!(error = %err, "Broken system version invariant, shutting down");
            if let Err(send_err) = self.shutdown_tx.send(true) {
                tracing::warn!("Failed to send shutdown signal: {}", send_err);
            }
        } else {
            tracing::error!(error = %err, "Caught unexpected error");
        }

        ApiError::Internal {
            details: (self.environment == Environment::Development).then(|| err.to_string()),
        }
    }
}
