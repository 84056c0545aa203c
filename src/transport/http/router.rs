use crate::domain::{Person, PersonDraft};
use crate::transport::http::access_log::access_log;
use crate::transport::http::handlers::{fallback, health, info, people};
use crate::transport::http::types::{AppState, ErrorBody, HealthResponse};
use axum::handler::HandlerWithoutStateExt;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        info::info_handler,
        people::list_people_handler,
        people::get_person_handler,
        people::create_person_handler,
        people::update_person_handler,
        people::delete_person_handler
    ),
    components(schemas(Person, PersonDraft, ErrorBody, HealthResponse))
)]
pub struct ApiDoc;

/// API routes only; unmatched paths get the JSON 404.
pub fn create_router(app_state: AppState) -> Router {
    api_routes(app_state).fallback(fallback::unknown_endpoint)
}

/// API routes plus static assets from `static_dir` for every unmatched path.
///
/// Falls back to `create_router` when the directory does not exist.
pub fn create_router_with_static(app_state: AppState, static_dir: &Path) -> Router {
    if !static_dir.is_dir() {
        tracing::info!(dir = %static_dir.display(), "static directory not found, serving API only");
        return create_router(app_state);
    }
    let assets = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(fallback::unknown_endpoint.into_service());
    api_routes(app_state).fallback_service(assets)
}

// Each method router falls back to the JSON 404 so a known path with an unsupported
// method answers like any other unmatched request instead of an empty 405.
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health::healthcheck_handler).fallback(fallback::unknown_endpoint),
        )
        .route(
            "/info",
            get(info::info_handler).fallback(fallback::unknown_endpoint),
        )
        .route(
            "/api/people",
            get(people::list_people_handler)
                .post(people::create_person_handler)
                .fallback(fallback::unknown_endpoint),
        )
        .route(
            "/api/people/:id",
            get(people::get_person_handler)
                .put(people::update_person_handler)
                .delete(people::delete_person_handler)
                .fallback(fallback::unknown_endpoint),
        )
        .with_state(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

/// Permissive CORS and access logging around any router built here.
///
/// The access log is the outermost layer so CORS preflights are logged too.
pub fn with_layers(router: Router) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    router.layer(cors).layer(middleware::from_fn(access_log))
}
