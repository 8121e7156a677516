//! Error types for wsl-api
//!
//! Store errors are passed through with their raw text. The HTTP status
//! depends on the operation that failed, so handlers pick the variant.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// No song with the requested id (404, empty body)
    #[error("Song not found")]
    NotFound,

    /// Leader path segment names no store (404)
    #[error("Unknown worship leader: {0}")]
    UnknownLeader(String),

    /// Malformed request body or id (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Store refused a create or update (400)
    #[error("Store rejected request: {0}")]
    Rejected(wsl_common::Error),

    /// Store failed while reading or deleting (500)
    #[error("Store error: {0}")]
    Store(wsl_common::Error),
}

impl ApiError {
    /// Map a store error to 400, for create and update
    pub fn rejected(err: wsl_common::Error) -> Self {
        ApiError::Rejected(err)
    }

    /// Map a store error to 500, for list and delete
    pub fn store(err: wsl_common::Error) -> Self {
        ApiError::Store(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            ApiError::UnknownLeader(name) => (
                StatusCode::NOT_FOUND,
                "UNKNOWN_LEADER",
                format!("Unknown worship leader: {}", name),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Rejected(err) => (StatusCode::BAD_REQUEST, "STORE_REJECTED", err.to_string()),
            ApiError::Store(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "STORE_ERROR",
                err.to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
