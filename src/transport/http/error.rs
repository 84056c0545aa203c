//! Translation of service failures into HTTP responses.

use crate::app::PhonebookError;
use crate::domain::validation::NAME_NOT_UNIQUE;
use crate::storage::StoreError;
use crate::transport::http::types::ErrorBody;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const MALFORMATTED_ID: &str = "malformatted id";
pub const UNKNOWN_ENDPOINT: &str = "unknown endpoint";
const INTERNAL: &str = "internal server error";

/// Status and public message for a failure. Database errors stay opaque to the client.
pub fn classify(err: &PhonebookError) -> (StatusCode, String) {
    match err {
        PhonebookError::ClientInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        PhonebookError::Store(StoreError::MalformedId(_)) => {
            (StatusCode::BAD_REQUEST, MALFORMATTED_ID.to_string())
        }
        PhonebookError::Store(StoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
        PhonebookError::Store(StoreError::DuplicateName(_)) => {
            (StatusCode::BAD_REQUEST, NAME_NOT_UNIQUE.to_string())
        }
        PhonebookError::Store(StoreError::Database(_)) => {
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL.to_string())
        }
    }
}

impl IntoResponse for PhonebookError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl From<JsonRejection> for PhonebookError {
    fn from(rejection: JsonRejection) -> Self {
        PhonebookError::ClientInput(rejection.body_text())
    }
}
