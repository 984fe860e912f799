//! Health and status handlers

use crate::api::rest::state::AppState;
use crate::error::{ApiError, ApiResult};
use axum::{extract::State, http::Uri, Json};
use serde::Serialize;
use sysver_types::SystemVersionId;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime: String,
    pub environment: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        uptime: state.uptime(),
        environment: state.environment.to_string(),
        version: state.version.clone(),
    })
}

/// Daemon status response
#[derive(Debug, Serialize)]
pub struct DaemonStatusResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub stats: DaemonStats,
}

/// Daemon statistics
#[derive(Debug, Serialize)]
pub struct DaemonStats {
    pub services_tracked: usize,
    pub deployments_recorded: usize,
    pub system_versions: usize,
    pub current_system_version: SystemVersionId,
}

/// Daemon status endpoint
pub async fn daemon_status(State(state): State<AppState>) -> ApiResult<Json<DaemonStatusResponse>> {
    let deployments = state.coordinator.deployments();
    let system_versions = state.coordinator.system_versions();

    let stats = async {
        Ok::<_, sysver_registry::RegistryError>(DaemonStats {
            services_tracked: deployments.service_count().await?,
            deployments_recorded: deployments.deployment_count().await?,
            system_versions: system_versions.snapshot_count().await?,
            current_system_version: system_versions.current_id().await?,
        })
    }
    .await
    .map_err(|e| state.deployment_error(e.into()))?;

    Ok(Json(DaemonStatusResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
        uptime: state.uptime(),
        started_at: state.started_at,
        stats,
    }))
}

/// Fallback for unmatched routes
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.to_string())
}
