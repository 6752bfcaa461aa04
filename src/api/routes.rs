//! HTTP API route definitions.

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    self, get_status, health, render_metrics, set_status, AppState, HealthResponse,
};

/// OpenAPI document for the service.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_status,
        handlers::set_status,
        handlers::render_metrics
    ),
    components(schemas(HealthResponse)),
    tags(
        (name = "status", description = "Read and write the service status"),
        (name = "health", description = "Liveness and metrics")
    )
)]
pub struct ApiDoc;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status resource
        .route("/status", get(get_status).post(set_status))
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(render_metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
