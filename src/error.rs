//! Error types for the cache controller
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache controller.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The fixed install-time precache list could not be stored in full
    #[error("Install precache failed: {0}")]
    InstallFailed(String),

    /// Upstream fetch failed and no cached fallback was available
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// Internal controller error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            CacheError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            CacheError::InstallFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            CacheError::Unreachable(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            CacheError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache controller.
pub type Result<T> = std::result::Result<T, CacheError>;
