//! Error types for vibevault-api
//!
//! Validation problems surface field by field; provider and database failures
//! collapse to a generic message while the detail goes to the log.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};
use vibevault_common::Error as CommonError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed JSON body or query string (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Error from the store or the model
    #[error(transparent)]
    Common(#[from] CommonError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg, Value::Array(Vec::new()))
            }
            ApiError::Common(CommonError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Invalid media data".to_string(),
                json!(errors),
            ),
            ApiError::Common(CommonError::NotFound(msg)) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{} not found", msg),
                Value::Array(Vec::new()),
            ),
            ApiError::Common(CommonError::Auth(msg)) => {
                warn!("Rejected request: {}", msg);
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg, Value::Array(Vec::new()))
            }
            ApiError::Common(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                    Value::Array(Vec::new()),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "details": details,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
