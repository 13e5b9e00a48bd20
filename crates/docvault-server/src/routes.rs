//! HTTP routes
//!
//! | Route | Store operation |
//! |---|---|
//! | `GET /health` | `health` |
//! | `GET /reload` | `load` |
//! | `POST /validate` | `validate` |
//! | `POST /save` | `save` |
//! | `GET /backups` | `list_backups` |
//! | `GET /restore/:filename` | `restore` |

use crate::error::{ApiError, ApiResult};
use crate::request_id;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Extension, Json, Router};
use docvault_core::{ExError, ExErrorKind, ValidationReport};
use docvault_core_types::RequestId;
use docvault_store::{DocumentStore, HealthReport, SaveOutcome, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared store handle
pub type AppState = Arc<DocumentStore>;

const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the application router over `store`
pub fn router(store: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/reload", get(reload))
        .route("/validate", post(validate))
        .route("/save", post(save))
        .route("/backups", get(list_backups))
        .route("/restore/:filename", get(restore))
        .fallback(not_found)
        .with_state(store)
        .layer(middleware::from_fn(request_id::propagate))
        .layer(TraceLayer::new_for_http())
}

// ==================
// Request/Response Types
// ==================

/// Body of `/validate` and `/save`; a missing `content` is the empty document
#[derive(Debug, Default, Deserialize)]
pub struct ContentRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: HealthReport,
}

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_changes: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct BackupEntry {
    pub filename: String,
    pub size: u64,
    pub modified: String,
}

impl From<Snapshot> for BackupEntry {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            modified: snapshot.modified_at.format(MODIFIED_FORMAT).to_string(),
            size: snapshot.size_bytes,
            filename: snapshot.filename,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BackupsResponse {
    pub backups: Vec<BackupEntry>,
}

#[derive(Debug, Serialize)]
pub struct RestoreResponse {
    pub success: bool,
    pub content: String,
    pub message: String,
}

// ==================
// Handlers
// ==================

async fn health(State(store): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let report = blocking(&store, |store| store.health()).await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        report,
    }))
}

async fn reload(State(store): State<AppState>) -> ApiResult<Json<ContentResponse>> {
    let content = blocking(&store, |store| store.load()).await?;
    Ok(Json(ContentResponse { content }))
}

async fn validate(
    State(store): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ValidationReport>> {
    let request = parse_content(&body)?;
    let report = blocking(&store, move |store| store.validate(&request.content)).await?;
    Ok(Json(report))
}

async fn save(
    State(store): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> ApiResult<Response> {
    let request = parse_content(&body)?;
    let outcome = blocking(&store, move |store| store.save(&request.content)).await?;

    let response = match outcome {
        Ok(outcome @ SaveOutcome::Rejected { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(SaveResponse {
                success: false,
                message: None,
                error: Some(outcome.message()),
                no_changes: None,
            }),
        ),
        Ok(outcome @ SaveOutcome::NoOp) => (
            StatusCode::OK,
            Json(SaveResponse {
                success: true,
                message: Some(outcome.message()),
                error: None,
                no_changes: Some(true),
            }),
        ),
        Ok(outcome @ SaveOutcome::Saved { .. }) => (
            StatusCode::OK,
            Json(SaveResponse {
                success: true,
                message: Some(outcome.message()),
                error: None,
                no_changes: None,
            }),
        ),
        Err(err) => {
            let err = err.with_request_id(request_id);
            tracing::error!(error = %err, "save failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SaveResponse {
                    success: false,
                    message: None,
                    error: Some(format!("Error saving file: {}", err.message())),
                    no_changes: None,
                }),
            )
        }
    };
    Ok(response.into_response())
}

async fn list_backups(State(store): State<AppState>) -> ApiResult<Json<BackupsResponse>> {
    let snapshots = blocking(&store, |store| store.list_backups()).await??;
    Ok(Json(BackupsResponse {
        backups: snapshots.into_iter().map(BackupEntry::from).collect(),
    }))
}

async fn restore(
    State(store): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(filename): Path<String>,
) -> ApiResult<Json<RestoreResponse>> {
    let restored = blocking(&store, move |store| store.restore(&filename))
        .await?
        .map_err(|err| err.with_request_id(request_id))?;
    Ok(Json(RestoreResponse {
        success: true,
        message: restored.message(),
        content: restored.content,
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(crate::error::ErrorResponse {
            error: "Endpoint not found".to_string(),
        }),
    )
}

// ==================
// Helpers
// ==================

/// Run a store call on the blocking pool, inside the request span
async fn blocking<T, F>(store: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&DocumentStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(store);
    let span = tracing::Span::current();
    tokio::task::spawn_blocking(move || span.in_scope(|| f(&store)))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "store task failed");
            ApiError::from(
                ExError::new(ExErrorKind::Internal)
                    .with_op("spawn_blocking")
                    .with_message("Internal server error"),
            )
        })
}

fn parse_content(body: &[u8]) -> ApiResult<ContentRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContentRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_defaults_missing_field() {
        assert_eq!(parse_content(b"{}").unwrap().content, "");
        assert_eq!(parse_content(b"").unwrap().content, "");
        assert_eq!(
            parse_content(br#"{"content": "a: 1\n"}"#).unwrap().content,
            "a: 1\n"
        );
    }

    #[test]
    fn test_parse_content_rejects_non_json() {
        assert!(matches!(
            parse_content(b"a: 1"),
            Err(ApiError::InvalidBody(_))
        ));
    }
}
