#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use docvault_core::logging_facility::test_capture::init_test_capture;
use docvault_core_types::schema::{EVENT_END, EVENT_END_ERROR, OP_RESTORE, OP_SAVE};
use docvault_server::router;
use docvault_store::{DocumentStore, StoreConfig};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

// Store events run on the blocking pool; they must still carry the request id
#[tokio::test]
async fn test_store_events_carry_request_id() {
    let capture = init_test_capture();
    let dir = TempDir::new().unwrap();
    let store = Arc::new(DocumentStore::new(StoreConfig::rooted_at(dir.path())));

    let response = router(Arc::clone(&store))
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/save")
                .header("x-request-id", "req-save-1")
                .body(Body::from(r#"{"content": "a: 1\n"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let end = capture
        .events()
        .into_iter()
        .find(|e| {
            e.op() == Some(OP_SAVE)
                && e.event() == Some(EVENT_END)
                && e.request_id() == Some("req-save-1")
        })
        .expect("save end event tagged with the request id");
    assert_eq!(end.field("path"), Some("/save"));

    let response = router(store)
        .oneshot(
            Request::builder()
                .uri("/restore/services_20200101_000000.yaml")
                .header("x-request-id", "req-restore-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let failed = capture.count_events(|e| {
        e.op() == Some(OP_RESTORE)
            && e.event() == Some(EVENT_END_ERROR)
            && e.request_id() == Some("req-restore-1")
    });
    assert_eq!(failed, 1);
}
