//! Driving port for category reads and derived tree views.

use async_trait::async_trait;

use crate::domain::{CategoryId, CategoryTree, CategoryView, Error, FlatNode};

/// Driving port for category queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryQuery: Send + Sync {
    /// List active categories.
    async fn list_active(&self) -> Result<Vec<CategoryView>, Error>;

    /// Fetch one category by id, active or not.
    async fn get(&self, id: CategoryId) -> Result<CategoryView, Error>;

    /// Nested tree of active categories and products under `id`.
    async fn product_tree(&self, id: CategoryId) -> Result<CategoryTree, Error>;

    /// Every category followed by its products.
    async fn flat_tree(&self) -> Result<Vec<FlatNode>, Error>;
}
