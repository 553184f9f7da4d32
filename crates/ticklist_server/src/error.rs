//! Unified server error type.
//!
//! Every handler returns `Result<T, ApiError>`, which implements
//! [`axum::response::IntoResponse`] so failures become a JSON
//! `{"error": ...}` body with the matching status code.
//!
//! Internal errors (store, medium) are logged with full detail but only
//! a generic message is returned to the caller, so SQL, file paths and
//! other implementation details never leak to clients.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use thiserror::Error;
use ticklist_core::StoreError;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The caller referenced a task that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Store or other internal failure; detail stays server-side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(inner) => Self::BadRequest(inner.to_string()),
            StoreError::NotFound(id) => Self::NotFound(format!("task {id} not found")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Malformed client JSON is a client error, same as any other
        // invalid input.
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),

            // Internal errors: log the full detail, answer generically.
            Self::Internal(message) => {
                error!("event=request_failed module=http status=error error={message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}
