//! Category domain service.
//!
//! Implements [`CategoryCommand`] and [`CategoryQuery`] over a
//! [`CategoryRepository`], validating input and building tree views from a
//! storage snapshot.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info};

use crate::domain::ports::{
    CategoryCommand, CategoryQuery, CategoryRepository, CategoryRepositoryError,
    CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::domain::validation::{parse_name, slug_failure};
use crate::domain::{
    CategoryId, CategoryPatch, CategoryTree, CategoryView, Error, FlatNode, NewCategory,
    TreeError, build_flat_tree, build_product_tree,
};

const NOT_FOUND: &str = "category not found";

/// Category service implementing the driving ports.
#[derive(Clone)]
pub struct CategoryService<R> {
    repository: Arc<R>,
}

impl<R> CategoryService<R> {
    /// Create a new service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> CategoryService<R>
where
    R: CategoryRepository,
{
    fn map_repository_error(err: CategoryRepositoryError) -> Error {
        match err {
            CategoryRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("category repository unavailable: {message}"))
            }
            CategoryRepositoryError::Query { message } => {
                error!(%message, "category query failed");
                Error::internal(format!("category repository error: {message}"))
            }
            CategoryRepositoryError::Integrity { message } => Error::conflict(message),
        }
    }

    fn map_tree_error(err: TreeError) -> Error {
        match err {
            TreeError::RootNotFound { .. } => Error::not_found(NOT_FOUND),
            TreeError::CycleDetected { category_id } => Error::conflict(err.to_string())
                .with_details(json!({
                    "categoryId": category_id,
                    "code": "category_cycle",
                })),
        }
    }

    fn build_patch(request: UpdateCategoryRequest) -> Result<CategoryPatch, Error> {
        let name = request.name.map(parse_name).transpose()?;
        Ok(CategoryPatch {
            name,
            is_active: request.is_active,
            parent_id: request.parent_id,
        })
    }
}

#[async_trait]
impl<R> CategoryQuery for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn list_active(&self) -> Result<Vec<CategoryView>, Error> {
        self.repository
            .list_active()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: CategoryId) -> Result<CategoryView, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }

    async fn product_tree(&self, id: CategoryId) -> Result<CategoryTree, Error> {
        let snapshot = self
            .repository
            .snapshot()
            .await
            .map_err(Self::map_repository_error)?;
        build_product_tree(&snapshot, id).map_err(Self::map_tree_error)
    }

    async fn flat_tree(&self) -> Result<Vec<FlatNode>, Error> {
        let snapshot = self
            .repository
            .snapshot()
            .await
            .map_err(Self::map_repository_error)?;
        Ok(build_flat_tree(&snapshot))
    }
}

#[async_trait]
impl<R> CategoryCommand for CategoryService<R>
where
    R: CategoryRepository,
{
    async fn create(&self, request: CreateCategoryRequest) -> Result<CategoryView, Error> {
        let name = parse_name(request.name)?;
        let category = NewCategory::new(name, request.parent_id).map_err(slug_failure)?;
        let view = self
            .repository
            .insert(&category)
            .await
            .map_err(Self::map_repository_error)?;
        info!(category_id = view.id, slug = %view.slug, "category created");
        Ok(view)
    }

    async fn update(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> Result<CategoryView, Error> {
        let patch = Self::build_patch(request)?;
        if patch.is_empty() {
            return self.get(id).await;
        }
        let view = self
            .repository
            .update(id, &patch)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))?;
        info!(category_id = id, "category updated");
        Ok(view)
    }

    async fn delete(&self, id: CategoryId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }
        info!(category_id = id, "category deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "category_service_tests.rs"]
mod tests;
