//! Driving port for product reads.

use async_trait::async_trait;

use crate::domain::{Error, ProductId, ProductView};

/// Driving port for product queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// List active products with their category names.
    async fn list_active(&self) -> Result<Vec<ProductView>, Error>;

    /// Fetch one product by id, active or not.
    async fn get(&self, id: ProductId) -> Result<ProductView, Error>;
}
