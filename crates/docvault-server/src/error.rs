//! HTTP error mapping
//!
//! Store errors keep their `ExErrorKind`; the status code is derived from it.
//! A store call that panics on the blocking pool surfaces as `Internal`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docvault_core::{ExError, ExErrorKind};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not a JSON object
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Failure reported by the document store
    #[error("{0}")]
    Store(#[from] ExError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(err) => match err.kind() {
                ExErrorKind::InvalidYaml | ExErrorKind::InvalidFilename => StatusCode::BAD_REQUEST,
                ExErrorKind::NotFound => StatusCode::NOT_FOUND,
                ExErrorKind::Io | ExErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Text placed in the `error` field of the response body
    fn public_message(&self) -> String {
        match self {
            ApiError::Store(err) if err.kind().is_client_error() => err.message().to_string(),
            ApiError::Store(err) => match err.path() {
                Some(path) => format!("{}: {}", err.message(), path),
                None => err.message().to_string(),
            },
            other => other.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "request rejected");
        }
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}
