//! Driven port for product persistence.

use async_trait::async_trait;

use crate::domain::{NewProduct, ProductId, ProductPatch, ProductView};

use super::define_port_error;

define_port_error! {
    /// Errors raised by product storage adapters.
    pub enum ProductRepositoryError {
        /// Storage could not be reached or no connection was available.
        Connection =>
            "product repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query =>
            "product repository query failed: {message}",
        /// A uniqueness or foreign-key constraint rejected the write.
        Integrity =>
            "product constraint violated: {message}",
    }
}

/// Port for reading and writing products.
///
/// Views carry the owning category's name, or `None` when it cannot be
/// resolved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Return all active products in storage order.
    async fn list_active(&self) -> Result<Vec<ProductView>, ProductRepositoryError>;

    /// Fetch a product regardless of its active flag.
    async fn find_by_id(&self, id: ProductId)
    -> Result<Option<ProductView>, ProductRepositoryError>;

    /// Persist a new active, in-stock product.
    async fn insert(&self, product: &NewProduct) -> Result<ProductView, ProductRepositoryError>;

    /// Apply a partial update; `None` when `id` does not exist.
    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<ProductView>, ProductRepositoryError>;

    /// Delete a product. Returns `false` when `id` does not exist.
    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError>;
}
