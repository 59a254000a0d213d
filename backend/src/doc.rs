//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the inbound layer together
//! with the request and response schemas. Domain types are documented
//! through the wrappers in [`crate::inbound::http::schemas`] so the domain
//! stays free of utoipa.
//!
//! The generated document is served by Swagger UI in debug builds and
//! printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::categories::{
    CategoryResponse, CategoryTreeResponse, CreateCategoryBody, DeletedResponse, FlatNodeResponse,
    FlatNodeType, ParentResponse, TreeProductResponse, UpdateCategoryBody,
};
use crate::inbound::http::products::{CreateProductBody, ProductResponse, UpdateProductBody};
use crate::inbound::http::root::WelcomeResponse;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        description = "Hierarchical product categories and their products."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::welcome,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::get_flat_tree,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::categories::get_category_tree,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        WelcomeResponse,
        CreateCategoryBody,
        UpdateCategoryBody,
        CategoryResponse,
        ParentResponse,
        CategoryTreeResponse,
        TreeProductResponse,
        FlatNodeResponse,
        FlatNodeType,
        DeletedResponse,
        CreateProductBody,
        UpdateProductBody,
        ProductResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "categories", description = "Category hierarchy and derived trees"),
        (name = "products", description = "Products owned by categories"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "meta", description = "Service landing document")
    )
)]
pub struct ApiDoc;
