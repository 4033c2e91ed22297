use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageResponse { pub message: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

/// Request body; `type` and identifiers are ignored.
#[derive(ToSchema)]
pub struct FeatureInputDoc {
    #[schema(value_type = Object)]
    pub geometry: Option<String>,
    #[schema(value_type = Object)]
    pub properties: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FeatureDoc {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[schema(value_type = Object)]
    pub geometry: String,
    #[schema(value_type = Object)]
    pub properties: String,
}

#[derive(Serialize, ToSchema)]
pub struct CreatedDoc {
    #[serde(rename = "insertedID")]
    pub inserted_id: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::ready,
        crate::routes::features::list,
        crate::routes::features::create,
        crate::routes::features::replace,
        crate::routes::features::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageResponse,
            ErrorResponse,
            FeatureInputDoc,
            FeatureDoc,
            CreatedDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "features")
    )
)]
pub struct ApiDoc;
