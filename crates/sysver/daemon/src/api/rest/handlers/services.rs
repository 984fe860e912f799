//! System version lookup handler

use crate::api::rest::state::AppState;
use crate::api::rest::validation::{parse_system_version, ServicesQuery};
use crate::error::{ApiError, ApiResult};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use sysver_types::ServiceVersion;

/// List the services that were live at `?systemVersion=N`
pub async fn get_services(
    State(state): State<AppState>,
    query: Result<Query<ServicesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ServiceVersion>>> {
    let Query(query) =
        query.map_err(|rejection| ApiError::invalid("query", rejection.body_text()))?;
    let system_version = parse_system_version(query.system_version.as_deref())?;

    let services = state
        .query
        .get_services(system_version)
        .await
        .map_err(|e| state.deployment_error(e))?;

    Ok(Json(services))
}
