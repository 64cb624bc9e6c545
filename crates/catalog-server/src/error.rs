//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all product endpoints. It
//! implements `axum::response::IntoResponse` to produce structured JSON error
//! bodies with the matching status code.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use catalog_core::CoreError;
use catalog_storage::StorageError;

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Structured validation details, such as the list of missing fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// The underlying store error, for store failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed request body or path (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required field was missing (400).
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// Internal failure reported without the underlying cause (500).
    #[error("internal error: {0}")]
    InternalError(String),

    /// The store call failed (500). The raw error is echoed to the client.
    #[error("{message}: {source}")]
    Store {
        message: String,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    /// Wraps a store failure under the generic "Server error" message.
    pub fn store(source: StorageError) -> Self {
        ApiError::Store {
            message: "Server error".to_string(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) | ApiError::Store { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::NotFound(msg) => ApiErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: msg,
                details: None,
                error: None,
            },
            ApiError::BadRequest(msg) => ApiErrorDetail {
                code: "BAD_REQUEST".to_string(),
                message: msg,
                details: None,
                error: None,
            },
            ApiError::Validation(err) => {
                let details = match &err {
                    CoreError::MissingFields { missing } => {
                        Some(serde_json::json!({ "missing": missing }))
                    }
                    CoreError::IdRequired | CoreError::NoUpdateFields => None,
                };
                ApiErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: err.to_string(),
                    details,
                    error: None,
                }
            }
            ApiError::InternalError(msg) => ApiErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: msg,
                details: None,
                error: None,
            },
            ApiError::Store { message, source } => ApiErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message,
                details: None,
                error: Some(serde_json::Value::String(source.to_string())),
            },
        };

        (status, axum::Json(detail)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
