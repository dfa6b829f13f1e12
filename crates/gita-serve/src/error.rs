//! API error types and response formatting.

use axum::Json;
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::repository::FetchError;

/// API error type that converts to appropriate HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No verse has the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// The chapter or verse path segment is malformed.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Storage failed while fetching the verse or its commentaries.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl From<gita_core::Error> for ApiError {
    fn from(err: gita_core::Error) -> Self {
        Self::BadRequest(err.to_string())
    }
}

// Undecodable segments such as `%FF` stay in the JSON error format.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error response body.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            Self::Fetch(err) => {
                tracing::error!(error = %err, "verse fetch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "fetch_error",
                    Some("A database error occurred".to_string()),
                )
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
