//! Product endpoints.
//!
//! ```text
//! GET    /products
//! POST   /products
//! GET    /products/{id}
//! PATCH  /products/{id}
//! DELETE /products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ProductView;
use crate::domain::ports::{CreateProductRequest, UpdateProductRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::categories::DeletedResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /products`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductBody {
    #[schema(example = "X1")]
    pub name: String,
    #[schema(example = 199.99)]
    pub price: f64,
    pub category_id: i32,
}

impl From<CreateProductBody> for CreateProductRequest {
    fn from(body: CreateProductBody) -> Self {
        Self {
            name: body.name,
            price: body.price,
            category_id: body.category_id,
        }
    }
}

/// Request body for `PATCH /products/{id}`.
///
/// `null` and absent fields are both ignored; at least one field must be
/// set.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category_id: Option<i32>,
}

impl From<UpdateProductBody> for UpdateProductRequest {
    fn from(body: UpdateProductBody) -> Self {
        Self {
            name: body.name,
            price: body.price,
            category_id: body.category_id,
        }
    }
}

/// Product with its resolved category name.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "X1")]
    pub name: String,
    #[schema(example = 199.99)]
    pub price: f64,
    pub category_id: i32,
    /// `null` when the owning category cannot be resolved.
    #[schema(example = "Phones")]
    pub category_name: Option<String>,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            price: view.price,
            category_id: view.category_id,
            category_name: view.category_name,
        }
    }
}

/// List active products.
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "Active products", body = [ProductResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<ProductResponse>>> {
    let views = state.products_query.list_active().await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductBody,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 409, description = "Duplicate slug or unknown category", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProductBody>,
) -> ApiResult<HttpResponse> {
    let view = state.products.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ProductResponse::from(view)))
}

/// Fetch a product by id.
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<ProductResponse>> {
    let view = state.products_query.get(path.into_inner()).await?;
    Ok(web::Json(view.into()))
}

/// Partially update a product. Renaming recomputes the slug.
#[utoipa::path(
    patch,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    request_body = UpdateProductBody,
    responses(
        (status = 200, description = "Updated product", body = ProductResponse),
        (status = 400, description = "Empty update payload", body = ErrorSchema),
        (status = 404, description = "Product not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateProductBody>,
) -> ApiResult<web::Json<ProductResponse>> {
    let view = state
        .products
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = DeletedResponse),
        (status = 404, description = "Product not found", body = ErrorSchema)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletedResponse>> {
    state.products.delete(path.into_inner()).await?;
    Ok(web::Json(DeletedResponse::new("product deleted")))
}

/// Register the product routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_products)
        .service(create_product)
        .service(get_product)
        .service(update_product)
        .service(delete_product);
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
