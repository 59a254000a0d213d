//! Product domain service implementing [`ProductCommand`] and
//! [`ProductQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    CreateProductRequest, ProductCommand, ProductQuery, ProductRepository,
    ProductRepositoryError, UpdateProductRequest,
};
use crate::domain::validation::{parse_name, parse_price, slug_failure};
use crate::domain::{Error, NewProduct, ProductId, ProductPatch, ProductView};

const NOT_FOUND: &str = "product not found";

/// Product service implementing the driving ports.
#[derive(Clone)]
pub struct ProductService<R> {
    repository: Arc<R>,
}

impl<R> ProductService<R> {
    /// Create a new service over `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ProductService<R>
where
    R: ProductRepository,
{
    fn map_repository_error(err: ProductRepositoryError) -> Error {
        match err {
            ProductRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("product repository unavailable: {message}"))
            }
            ProductRepositoryError::Query { message } => {
                error!(%message, "product query failed");
                Error::internal(format!("product repository error: {message}"))
            }
            ProductRepositoryError::Integrity { message } => Error::conflict(message),
        }
    }

    fn build_patch(request: UpdateProductRequest) -> Result<ProductPatch, Error> {
        let name = request.name.map(parse_name).transpose()?;
        let price = request.price.map(parse_price).transpose()?;
        ProductPatch::new(name, price, request.category_id).map_err(slug_failure)
    }
}

#[async_trait]
impl<R> ProductQuery for ProductService<R>
where
    R: ProductRepository,
{
    async fn list_active(&self) -> Result<Vec<ProductView>, Error> {
        self.repository
            .list_active()
            .await
            .map_err(Self::map_repository_error)
    }

    async fn get(&self, id: ProductId) -> Result<ProductView, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))
    }
}

#[async_trait]
impl<R> ProductCommand for ProductService<R>
where
    R: ProductRepository,
{
    async fn create(&self, request: CreateProductRequest) -> Result<ProductView, Error> {
        let name = parse_name(request.name)?;
        let price = parse_price(request.price)?;
        let product = NewProduct::new(name, price, request.category_id).map_err(slug_failure)?;
        let view = self
            .repository
            .insert(&product)
            .await
            .map_err(Self::map_repository_error)?;
        info!(product_id = view.id, "product created");
        Ok(view)
    }

    async fn update(
        &self,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> Result<ProductView, Error> {
        if request.is_empty() {
            return Err(Error::invalid_request(
                "update payload must contain at least one field",
            ));
        }
        let patch = Self::build_patch(request)?;
        let view = self
            .repository
            .update(id, &patch)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Error::not_found(NOT_FOUND))?;
        info!(product_id = id, "product updated");
        Ok(view)
    }

    async fn delete(&self, id: ProductId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Error::not_found(NOT_FOUND));
        }
        info!(product_id = id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "product_service_tests.rs"]
mod tests;
