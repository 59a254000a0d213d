//! Driving port for product writes.

use async_trait::async_trait;

use crate::domain::{CategoryId, Error, ProductId, ProductView};

/// Request to create a product.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub category_id: CategoryId,
}

/// Request to partially update a product. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<CategoryId>,
}

impl UpdateProductRequest {
    /// Return `true` when no field is present.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category_id.is_none()
    }
}

/// Driving port for product mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// Validate and create a product.
    async fn create(&self, request: CreateProductRequest) -> Result<ProductView, Error>;

    /// Apply the fields present in `request`.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` without touching storage when the request
    /// carries no field.
    async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<ProductView, Error>;

    /// Delete a product.
    async fn delete(&self, id: ProductId) -> Result<(), Error>;
}
