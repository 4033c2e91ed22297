use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use common::types::Message;
use models::FeatureId;
use service::feature::{Created, Feature, FeatureInput, FeatureService};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::observability::{self, observe, OUTCOME_CLIENT_ERROR};
use crate::state::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page; enables pagination when present
    pub page: Option<u32>,
    /// page size, clamped to 1..=100; enables pagination when present
    pub per_page: Option<u32>,
}

/// Count a request the extractors refused and turn the rejection into a 400.
fn rejected(op: &str, e: impl Into<ApiError>) -> ApiError {
    observability::record(op, OUTCOME_CLIENT_ERROR);
    e.into()
}

/// The path id is checked before the body so a bad id is what gets reported.
fn path_id(op: &str, raw: &str) -> Result<FeatureId, ApiError> {
    FeatureService::parse_id(raw).map_err(|e| rejected(op, e))
}

#[utoipa::path(
    get, path = "/features", tag = "features",
    params(ListQuery),
    responses(
        (status = 200, description = "All features (or one page)", body = [crate::openapi::FeatureDoc]),
        (status = 400, description = "Bad query string", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Feature>>, ApiError> {
    let Query(q) = query.map_err(|e| rejected("list", e))?;
    let page = Pagination::from_query(q.page, q.per_page);
    let features = observe("list", state.features.list(page)).await?;
    info!(count = features.len(), paginated = page.is_some(), "list features");
    Ok(Json(features))
}

#[utoipa::path(
    post, path = "/features", tag = "features",
    request_body = crate::openapi::FeatureInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::CreatedDoc),
        (status = 400, description = "Malformed JSON body", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<FeatureInput>, JsonRejection>,
) -> Result<Json<Created>, ApiError> {
    let Json(input) = body.map_err(|e| rejected("create", e))?;
    let id = observe("create", state.features.create(input)).await?;
    Ok(Json(Created::from(id)))
}

/// Full replacement. Answers 200 even when no stored feature has this id.
#[utoipa::path(
    put, path = "/features/{id}", tag = "features",
    params(("id" = String, Path, description = "Feature id (24 hex characters)")),
    request_body = crate::openapi::FeatureInputDoc,
    responses(
        (status = 200, description = "Replaced (or nothing matched)", body = crate::openapi::MessageResponse),
        (status = 400, description = "Malformed id or JSON body", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn replace(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<FeatureInput>, JsonRejection>,
) -> Result<Json<Message>, ApiError> {
    let id = path_id("replace", &id)?;
    let Json(input) = body.map_err(|e| rejected("replace", e))?;
    observe("replace", state.features.replace(id, input)).await?;
    Ok(Json(Message::new("Feature updated successfully")))
}

/// Answers 200 whether or not something was deleted.
#[utoipa::path(
    delete, path = "/features/{id}", tag = "features",
    params(("id" = String, Path, description = "Feature id (24 hex characters)")),
    responses(
        (status = 200, description = "Deleted (or nothing matched)", body = crate::openapi::MessageResponse),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ApiError> {
    let id = path_id("delete", &id)?;
    observe("delete", state.features.delete(id)).await?;
    Ok(Json(Message::new("Feature deleted successfully")))
}
