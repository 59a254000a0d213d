//! Driving port for category writes.
//!
//! Requests carry raw, unvalidated input; implementations apply the name
//! rules and derive slugs before touching storage.

use async_trait::async_trait;

use crate::domain::{CategoryId, CategoryView, Error};

/// Request to create a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

/// Request to partially update a category.
///
/// `parent_id: Some(None)` moves the category to the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub parent_id: Option<Option<CategoryId>>,
}

/// Driving port for category mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryCommand: Send + Sync {
    /// Validate and create a category.
    ///
    /// # Errors
    ///
    /// - `validation_failed` when the name breaks the naming rules.
    /// - `conflict` when the slug is taken or the parent does not exist.
    async fn create(&self, request: CreateCategoryRequest) -> Result<CategoryView, Error>;

    /// Apply the fields present in `request`.
    async fn update(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryView, Error>;

    /// Delete a category and everything beneath it.
    async fn delete(&self, id: CategoryId) -> Result<(), Error>;
}
