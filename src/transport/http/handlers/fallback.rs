use crate::transport::http::error::UNKNOWN_ENDPOINT;
use crate::transport::http::types::ErrorBody;
use axum::http::StatusCode;
use axum::Json;

pub async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(UNKNOWN_ENDPOINT)))
}
