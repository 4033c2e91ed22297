use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::errors::ApiError;
use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod features;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Readiness: the store answers a ping within the operation timeout.
#[utoipa::path(
    get, path = "/ready", tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = crate::openapi::HealthResponse),
        (status = 503, description = "Store unreachable", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn ready(State(state): State<ServerState>) -> Result<Json<Health>, ApiError> {
    match state.features.ping().await {
        Ok(()) => Ok(Json(Health { status: "ok" })),
        Err(e) => {
            warn!(error = %e, "readiness check failed");
            Err(ApiError::unavailable(e.to_string()))
        }
    }
}

/// Build the full application router: feature CRUD, health, metrics and the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let feature_routes = Router::new()
        .route("/features", get(features::list).post(features::create))
        .route("/features/:id", put(features::replace).delete(features::delete))
        .route("/ready", get(ready))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(observability::metrics))
        .merge(feature_routes)
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
