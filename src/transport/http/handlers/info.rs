use crate::app::PhonebookResult;
use crate::transport::http::types::{AppState, ErrorBody};
use axum::extract::State;

#[utoipa::path(
    get,
    path = "/info",
    responses(
        (status = 200, description = "Record count and server time", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn info_handler(State(state): State<AppState>) -> PhonebookResult<String> {
    Ok(state.service.info().await?.render())
}
