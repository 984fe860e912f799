//! Deployment reporting handler

use crate::api::rest::state::AppState;
use crate::api::rest::validation::{validate_deployment, RawDeploymentRequest};
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use sysver_types::DeploymentResponse;

/// Record a deployment and return the resulting system version
pub async fn deploy(
    State(state): State<AppState>,
    payload: Result<Json<RawDeploymentRequest>, JsonRejection>,
) -> ApiResult<Json<DeploymentResponse>> {
    let Json(raw) = payload.map_err(|rejection| ApiError::invalid("body", rejection.body_text()))?;
    let request = validate_deployment(raw)?;

    let response = state
        .coordinator
        .handle_deployment(&request.name, request.version)
        .await
        .map_err(|e| state.deployment_error(e))?;

    tracing::info!(
        service = %request.name,
        version = request.version,
        system_version = %response.system_version,
        "Recorded deployment"
    );

    Ok(Json(response))
}
