//! Category endpoints.
//!
//! ```text
//! GET    /categories
//! POST   /categories
//! GET    /categories/flat-tree
//! GET    /categories/{id}
//! PATCH  /categories/{id}
//! DELETE /categories/{id}
//! GET    /categories/{id}/tree-with-products
//! ```
//!
//! `flat-tree` must be registered ahead of `{id}` so the literal segment wins.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::domain::{CategoryRef, CategoryTree, CategoryView, FlatNode, NodeKind, ProductSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /categories`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCategoryBody {
    #[schema(example = "Electronics")]
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<i32>,
}

impl From<CreateCategoryBody> for CreateCategoryRequest {
    fn from(body: CreateCategoryBody) -> Self {
        Self {
            name: body.name,
            parent_id: body.parent_id,
        }
    }
}

/// Map a present JSON field (including `null`) to `Some`, leaving absent
/// fields to `#[serde(default)]`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i32>::deserialize(deserializer).map(Some)
}

/// Request body for `PATCH /categories/{id}`.
///
/// `"parent_id": null` moves the category to the root; omitting the field
/// leaves the parent unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategoryBody {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub parent_id: Option<Option<i32>>,
}

impl From<UpdateCategoryBody> for UpdateCategoryRequest {
    fn from(body: UpdateCategoryBody) -> Self {
        Self {
            name: body.name,
            is_active: body.is_active,
            parent_id: body.parent_id,
        }
    }
}

/// Shortened parent reference.
#[derive(Debug, Serialize, ToSchema)]
pub struct ParentResponse {
    pub id: i32,
    pub name: String,
}

impl From<CategoryRef> for ParentResponse {
    fn from(parent: CategoryRef) -> Self {
        Self {
            id: parent.id,
            name: parent.name,
        }
    }
}

/// Category with its parent reference and owned product ids.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "Phones")]
    pub name: String,
    #[schema(example = "phones")]
    pub slug: String,
    pub is_active: bool,
    pub parent_id: Option<i32>,
    pub parent: Option<ParentResponse>,
    /// Ids of the products owned by this category.
    pub products: Vec<i32>,
}

impl From<CategoryView> for CategoryResponse {
    fn from(view: CategoryView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            slug: view.slug,
            is_active: view.is_active,
            parent_id: view.parent_id,
            parent: view.parent.map(ParentResponse::from),
            products: view.product_ids,
        }
    }
}

/// Product entry inside a tree node.
#[derive(Debug, Serialize, ToSchema)]
pub struct TreeProductResponse {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

impl From<ProductSummary> for TreeProductResponse {
    fn from(product: ProductSummary) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

/// Nested category node with active products and active children.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryTreeResponse {
    pub id: i32,
    pub name: String,
    pub products: Vec<TreeProductResponse>,
    #[schema(no_recursion)]
    pub children: Vec<CategoryTreeResponse>,
}

impl From<CategoryTree> for CategoryTreeResponse {
    fn from(tree: CategoryTree) -> Self {
        Self {
            id: tree.id,
            name: tree.name,
            products: tree.products.into_iter().map(Into::into).collect(),
            children: tree.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Kind of a flat tree entry.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlatNodeType {
    Category,
    Product,
}

/// One entry of the flat tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct FlatNodeResponse {
    pub id: i32,
    pub name: String,
    /// Present on products only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "type")]
    pub node_type: FlatNodeType,
    /// Parent category for categories, owning category for products.
    #[serde(rename = "parentId")]
    pub parent_id: Option<i32>,
}

impl From<FlatNode> for FlatNodeResponse {
    fn from(node: FlatNode) -> Self {
        let node_type = match node.kind {
            NodeKind::Category => FlatNodeType::Category,
            NodeKind::Product => FlatNodeType::Product,
        };
        Self {
            id: node.id,
            name: node.name,
            price: node.price,
            node_type,
            parent_id: node.parent_id,
        }
    }
}

/// Confirmation body returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    #[schema(example = "category deleted")]
    pub detail: String,
}

impl DeletedResponse {
    pub(crate) fn new(detail: &str) -> Self {
        Self {
            detail: detail.to_owned(),
        }
    }
}

/// List active categories.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Active categories", body = [CategoryResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<CategoryResponse>>> {
    let views = state.categories_query.list_active().await?;
    Ok(web::Json(views.into_iter().map(Into::into).collect()))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryBody,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 409, description = "Duplicate slug or unknown parent", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCategoryBody>,
) -> ApiResult<HttpResponse> {
    let view = state.categories.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(CategoryResponse::from(view)))
}

/// Flatten every category and product into one list.
#[utoipa::path(
    get,
    path = "/categories/flat-tree",
    responses(
        (status = 200, description = "Flat tree", body = [FlatNodeResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getFlatTree"
)]
#[get("/categories/flat-tree")]
pub async fn get_flat_tree(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<FlatNodeResponse>>> {
    let nodes = state.categories_query.flat_tree().await?;
    Ok(web::Json(nodes.into_iter().map(Into::into).collect()))
}

/// Fetch a category by id, active or not.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let view = state.categories_query.get(path.into_inner()).await?;
    Ok(web::Json(view.into()))
}

/// Partially update a category. Renaming keeps the slug.
#[utoipa::path(
    patch,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryBody,
    responses(
        (status = 200, description = "Updated category", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorSchema),
        (status = 409, description = "Unknown parent", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[patch("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateCategoryBody>,
) -> ApiResult<web::Json<CategoryResponse>> {
    let view = state
        .categories
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(view.into()))
}

/// Delete a category with its descendants and their products.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category deleted", body = DeletedResponse),
        (status = 404, description = "Category not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletedResponse>> {
    state.categories.delete(path.into_inner()).await?;
    Ok(web::Json(DeletedResponse::new("category deleted")))
}

/// Nested tree of active categories and products under a category.
#[utoipa::path(
    get,
    path = "/categories/{id}/tree-with-products",
    params(("id" = i32, Path, description = "Root category id")),
    responses(
        (status = 200, description = "Category tree", body = CategoryTreeResponse),
        (status = 404, description = "Category not found", body = ErrorSchema),
        (status = 409, description = "Cyclic hierarchy", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategoryTree"
)]
#[get("/categories/{id}/tree-with-products")]
pub async fn get_category_tree(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CategoryTreeResponse>> {
    let tree = state.categories_query.product_tree(path.into_inner()).await?;
    Ok(web::Json(tree.into()))
}

/// Register the category routes in matching order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_categories)
        .service(create_category)
        .service(get_flat_tree)
        .service(get_category)
        .service(update_category)
        .service(delete_category)
        .service(get_category_tree);
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
