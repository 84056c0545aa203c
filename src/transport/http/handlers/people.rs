use crate::app::PhonebookResult;
use crate::domain::{Person, PersonDraft};
use crate::transport::http::types::{AppState, ErrorBody};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// A found record as JSON, an absent one as an empty 204.
fn person_or_no_content(person: Option<Person>) -> Response {
    match person {
        Some(p) => Json(p).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/people",
    responses(
        (status = 200, description = "Every stored person", body = [Person]),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn list_people_handler(State(state): State<AppState>) -> PhonebookResult<Json<Vec<Person>>> {
    Ok(Json(state.service.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/people/{id}",
    params(("id" = String, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person found", body = Person),
        (status = 204, description = "No person with this id"),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn get_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PhonebookResult<Response> {
    Ok(person_or_no_content(state.service.get(&id).await?))
}

#[utoipa::path(
    post,
    path = "/api/people",
    request_body = PersonDraft,
    responses(
        (status = 200, description = "Person created, or number updated for an existing name", body = Person),
        (status = 400, description = "Missing fields, duplicate name or validation failure", body = ErrorBody)
    )
)]
pub async fn create_person_handler(
    State(state): State<AppState>,
    request: Result<Json<PersonDraft>, JsonRejection>,
) -> PhonebookResult<Json<Person>> {
    let Json(draft) = request?;
    Ok(Json(state.service.add(draft).await?))
}

#[utoipa::path(
    put,
    path = "/api/people/{id}",
    params(("id" = String, Path, description = "Person id")),
    request_body = PersonDraft,
    responses(
        (status = 200, description = "Updated person", body = Person),
        (status = 204, description = "No person with this id"),
        (status = 400, description = "Malformed id or validation failure", body = ErrorBody)
    )
)]
pub async fn update_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<PersonDraft>, JsonRejection>,
) -> PhonebookResult<Response> {
    let Json(draft) = request?;
    Ok(person_or_no_content(state.service.replace(&id, draft).await?))
}

#[utoipa::path(
    delete,
    path = "/api/people/{id}",
    params(("id" = String, Path, description = "Person id")),
    responses(
        (status = 204, description = "Removed, or nothing to remove"),
        (status = 400, description = "Malformed id", body = ErrorBody)
    )
)]
pub async fn delete_person_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PhonebookResult<StatusCode> {
    if let Some(removed) = state.service.remove(&id).await? {
        tracing::debug!(id = %removed.id, name = %removed.name, "person removed");
    }
    Ok(StatusCode::NO_CONTENT)
}
