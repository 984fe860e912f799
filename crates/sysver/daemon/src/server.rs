//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::Router;
use std::sync::Arc;
use sysver_deployment::{DeploymentCoordinator, ServiceQuery};
use sysver_registry::{InMemoryDeploymentStore, InMemorySystemVersionStore};
use tokio::net::TcpListener;
use tokio::sync::watch;

/// sysver daemon server
pub struct Server {
    config: DaemonConfig,
    state: AppState,
    shutdown_rx: watch::Receiver<bool>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config.validate()?;
        let api_key = config.auth.api_key.clone().unwrap_or_default();

        // Create stores
        let system_versions = Arc::new(InMemorySystemVersionStore::new());
        let deployments = Arc::new(InMemoryDeploymentStore::new());

        let coordinator = Arc::new(DeploymentCoordinator::new(
            deployments,
            system_versions.clone(),
        ));
        let query = Arc::new(ServiceQuery::new(system_versions));

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let state = AppState::new(
            coordinator,
            query,
            api_key,
            config.environment,
            shutdown_tx,
        );

        Ok(Self {
            config,
            state,
            shutdown_rx,
        })
    }

    /// Router serving this server's state
    pub fn router(&self) -> Router {
        create_router(self.state.clone(), &self.config.server)
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("sysver daemon listening on http://{}", addr);
        tracing::info!("Environment: {}", self.config.environment);

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(self.shutdown_rx))
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("sysver daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal(mut shutdown_rx: watch::Receiver<bool>) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let internal = async {
        // A dropped sender means nobody can request shutdown anymore
        if shutdown_rx.wait_for(|&stop| stop).await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
        _ = internal => {
            tracing::warn!("Internal shutdown requested, initiating graceful shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_requires_api_key() {
        let err = Server::new(DaemonConfig::default()).err();
        assert!(matches!(err, Some(DaemonError::Config(_))));
    }

    #[test]
    fn test_server_builds_with_key() {
        assert!(Server::new(DaemonConfig::for_tests("secret")).is_ok());
    }
}
