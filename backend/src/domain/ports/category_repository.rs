//! Driven port for category persistence.
//!
//! Adapters translate storage rows into [`CategoryView`]s, resolving the
//! parent reference and owned product ids as part of the read.

use async_trait::async_trait;

use crate::domain::{CatalogSnapshot, CategoryId, CategoryPatch, CategoryView, NewCategory};

use super::define_port_error;

define_port_error! {
    /// Errors raised by category storage adapters.
    pub enum CategoryRepositoryError {
        /// Storage could not be reached or no connection was available.
        Connection =>
            "category repository connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query =>
            "category repository query failed: {message}",
        /// A uniqueness or foreign-key constraint rejected the write.
        Integrity =>
            "category constraint violated: {message}",
    }
}

/// Port for reading and writing categories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Return all active categories in storage order.
    async fn list_active(&self) -> Result<Vec<CategoryView>, CategoryRepositoryError>;

    /// Fetch a category regardless of its active flag.
    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError>;

    /// Persist a new active category.
    async fn insert(&self, category: &NewCategory)
    -> Result<CategoryView, CategoryRepositoryError>;

    /// Apply a partial update; `None` when `id` does not exist.
    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError>;

    /// Delete a category together with its descendants and their products.
    ///
    /// Returns `false` when `id` does not exist.
    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError>;

    /// Load every category and product, active or not, in storage order.
    async fn snapshot(&self) -> Result<CatalogSnapshot, CategoryRepositoryError>;
}
