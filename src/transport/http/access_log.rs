//! Per-request access log line:
//! `METHOD URL STATUS SIZE - TIME ms BODY_JSON`.

use crate::transport::http::types::ErrorBody;
use axum::body::{Body, Bytes, HttpBody};
use axum::extract::Request;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::time::Instant;

/// Same ceiling axum applies to `Json` bodies by default.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY_BYTES).await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(method = %method, uri = %uri, error = %e, "failed to buffer request body");
            return payload_too_large();
        }
    };
    let logged_body = render_body(&bytes);

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| response.body().size_hint().exact().map(|n| n.to_string()));

    tracing::info!(
        target: "phonebook::access",
        "{}",
        format_line(
            method.as_str(),
            &uri.to_string(),
            response.status(),
            size.as_deref(),
            start.elapsed().as_secs_f64() * 1000.0,
            &logged_body,
        )
    );

    response
}

fn payload_too_large() -> Response {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorBody::new("request body too large")),
    )
        .into_response()
}

/// Compact JSON of the request body; `{}` when empty, raw text when not JSON.
pub fn render_body(bytes: &Bytes) -> String {
    if bytes.is_empty() {
        return "{}".to_string();
    }
    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(v) => v.to_string(),
        Err(_) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

pub fn format_line(
    method: &str,
    url: &str,
    status: StatusCode,
    size: Option<&str>,
    elapsed_ms: f64,
    body: &str,
) -> String {
    format!(
        "{} {} {} {} - {:.3} ms {}",
        method,
        url,
        status.as_u16(),
        size.unwrap_or("-"),
        elapsed_ms,
        body
    )
}
