//! Error types for sysver-daemon

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Daemon-level errors
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup error
    #[error("Server error: {0}")]
    Server(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for DaemonError {
    fn from(err: config::ConfigError) -> Self {
        DaemonError::Config(err.to_string())
    }
}

/// A single rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API-specific errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// No route matched the request
    #[error("Route not found")]
    RouteNotFound(String),

    /// Input failed validation
    #[error("Validation error")]
    Validation(Vec<FieldError>),

    /// No API key presented
    #[error("API key is required")]
    MissingApiKey,

    /// Wrong API key presented
    #[error("Invalid API key")]
    InvalidApiKey,

    /// Internal error; `details` is only set outside production
    #[error("Internal server error")]
    Internal { details: Option<String> },
}

impl ApiError {
    /// Validation error for a single field
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldError::new(field, message)])
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Auth and routing errors carry no machine code
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, Some("NOT_FOUND")),
            ApiError::RouteNotFound(_) => (StatusCode::NOT_FOUND, None),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, Some("VALIDATION_ERROR")),
            ApiError::MissingApiKey => (StatusCode::UNAUTHORIZED, None),
            ApiError::InvalidApiKey => (StatusCode::FORBIDDEN, None),
            ApiError::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Some("INTERNAL_ERROR"))
            }
        };

        let mut body = ErrorResponse {
            success: false,
            error: self.to_string(),
            code,
            message: None,
            details: None,
            path: None,
        };

        match self {
            ApiError::Validation(fields) => {
                tracing::warn!(?fields, "Validation error");
                body.details = serde_json::to_value(fields).ok();
            }
            ApiError::Internal { details } => {
                body.details = details.map(serde_json::Value::String);
            }
            ApiError::NotFound(message) => body.message = Some(message),
            ApiError::RouteNotFound(path) => body.path = Some(path),
            _ => {}
        }

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for daemon operations
pub type DaemonResult<T> = Result<T, DaemonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::NotFound("test".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );

        assert_eq!(
            ApiError::invalid("name", "required").into_response().status(),
            StatusCode::BAD_REQUEST
        );

        assert_eq!(
            ApiError::MissingApiKey.into_response().status(),
            StatusCode::UNAUTHORIZED
        );

        assert_eq!(
            ApiError::InvalidApiKey.into_response().status(),
            StatusCode::FORBIDDEN
        );

        assert_eq!(
            ApiError::Internal { details: None }.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::MissingApiKey.to_string(), "API key is required");
        assert_eq!(ApiError::InvalidApiKey.to_string(), "Invalid API key");
        assert_eq!(
            ApiError::NotFound("System version 9 not found".to_string()).to_string(),
            "System version 9 not found"
        );
    }
}
