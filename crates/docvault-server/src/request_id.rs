//! Request correlation
//!
//! Every request gets a `RequestId`: the caller's `x-request-id` header when
//! usable, otherwise a fresh UUIDv7. It is stored in the request extensions,
//! recorded on the request span and echoed back in the response header.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use docvault_core_types::schema::FIELD_REQUEST_ID;
use docvault_core_types::RequestId;
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn propagate(mut request: Request, next: Next) -> Response {
    let inbound = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let request_id = RequestId::adopt_or_new(inbound);
    request.extensions_mut().insert(request_id.clone());

    let span = tracing::info_span!(
        "request",
        { FIELD_REQUEST_ID } = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;
    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
