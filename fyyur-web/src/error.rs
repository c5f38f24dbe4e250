//! Error types for fyyur-web
//!
//! Failure detail is logged where the error is raised; the response body
//! only carries a generic, user-facing message.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request or rejected write (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Classify a failed (rolled back) mutation.
    ///
    /// Input and constraint failures are the caller's fault (400); anything
    /// else is a storage failure (500). `message` is what the caller sees.
    pub fn from_mutation(err: &fyyur_common::Error, message: impl Into<String>) -> Self {
        match err {
            fyyur_common::Error::InvalidInput(_) => ApiError::BadRequest(message.into()),
            fyyur_common::Error::NotFound(_) => ApiError::NotFound(message.into()),
            e if e.is_constraint_violation() => ApiError::BadRequest(message.into()),
            _ => ApiError::Internal(message.into()),
        }
    }
}

impl From<fyyur_common::Error> for ApiError {
    fn from(err: fyyur_common::Error) -> Self {
        tracing::error!("Request failed: {}", err);
        match err {
            fyyur_common::Error::NotFound(what) => ApiError::NotFound(what),
            fyyur_common::Error::InvalidInput(_) => {
                ApiError::BadRequest("The request could not be processed".to_string())
            }
            _ => ApiError::Internal("Something went wrong".to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("The request body could not be read".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("Rejected path parameters: {}", rejection.body_text());
        ApiError::BadRequest("The request path could not be read".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg,
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
