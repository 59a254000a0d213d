//! Service landing document.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Pointers to the interactive API documentation.
#[derive(Debug, Serialize, ToSchema)]
pub struct WelcomeResponse {
    #[schema(example = "Catalog API")]
    pub message: &'static str,
    #[schema(example = "/docs/index.html")]
    pub docs: &'static str,
    /// Raw OpenAPI document backing the Swagger UI.
    #[schema(example = "/api-docs/openapi.json")]
    pub openapi: &'static str,
}

/// Describe the service and where its documentation lives.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome document", body = WelcomeResponse)),
    tags = ["meta"],
    operation_id = "welcome"
)]
#[get("/")]
pub async fn welcome() -> web::Json<WelcomeResponse> {
    web::Json(WelcomeResponse {
        message: "Catalog API",
        docs: "/docs/index.html",
        openapi: "/api-docs/openapi.json",
    })
}
