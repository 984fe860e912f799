//! Shared-secret authentication for the `/api` routes

use crate::api::rest::state::AppState;
use crate::error::ApiError;
use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct ApiKeyQuery {
    api_key: Option<String>,
}

/// Key presented by the caller: header first, then `?api_key=`
fn presented_key(request: &Request) -> Option<String> {
    let from_header = request
        .headers()
        .get(API_KEY_HEADER)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|key| !key.is_empty());

    from_header.or_else(|| {
        Query::<ApiKeyQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(query)| query.api_key)
            .filter(|key| !key.is_empty())
    })
}

/// Reject requests without the configured API key
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match presented_key(&request) {
        None => Err(ApiError::MissingApiKey),
        Some(key) if key.as_str() != &*state.api_key => {
            tracing::debug!(path = %request.uri().path(), "Rejected invalid API key");
            Err(ApiError::InvalidApiKey)
        }
        Some(_) => Ok(next.run(request).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(key) = header {
            builder = builder.header(API_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_header_wins_over_query() {
        let req = request("/api/services?api_key=query-key", Some("header-key"));
        assert_eq!(presented_key(&req).as_deref(), Some("header-key"));
    }

    #[test]
    fn test_query_fallback() {
        let req = request("/api/services?systemVersion=1&api_key=query-key", None);
        assert_eq!(presented_key(&req).as_deref(), Some("query-key"));
    }

    #[test]
    fn test_empty_header_falls_back_to_query() {
        let req = request("/api/services?api_key=query-key", Some(""));
        assert_eq!(presented_key(&req).as_deref(), Some("query-key"));
    }

    #[test]
    fn test_empty_key_counts_as_missing() {
        assert_eq!(presented_key(&request("/api/deploy", Some(""))), None);
        assert_eq!(presented_key(&request("/api/deploy?api_key=", None)), None);
        assert_eq!(presented_key(&request("/api/deploy?api_key=", Some(""))), None);
        assert_eq!(presented_key(&request("/api/deploy", None)), None);
    }
}
