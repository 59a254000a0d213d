//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.
//!
//! Reads left-join `categories` so a view can carry the owning category's
//! name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{NewProduct, Product, ProductId, ProductPatch, ProductView};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductChangeset, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, products};

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ProductRepositoryError {
    map_pool_error(error, ProductRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ProductRepositoryError {
    map_diesel_error(
        error,
        ErrorConstructors {
            query: ProductRepositoryError::query,
            connection: ProductRepositoryError::connection,
            integrity: ProductRepositoryError::integrity,
        },
    )
}

fn to_view((row, category_name): (ProductRow, Option<String>)) -> ProductView {
    ProductView::from_parts(Product::from(row), category_name)
}

async fn find_view(
    conn: &mut AsyncPgConnection,
    id: ProductId,
) -> Result<Option<ProductView>, ProductRepositoryError> {
    let row = products::table
        .left_join(categories::table)
        .filter(products::id.eq(id))
        .select((ProductRow::as_select(), categories::name.nullable()))
        .first::<(ProductRow, Option<String>)>(conn)
        .await
        .optional()
        .map_err(diesel_error)?;
    Ok(row.map(to_view))
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn list_active(&self) -> Result<Vec<ProductView>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = products::table
            .left_join(categories::table)
            .filter(products::is_active.eq(true))
            .order(products::id.asc())
            .select((ProductRow::as_select(), categories::name.nullable()))
            .load::<(ProductRow, Option<String>)>(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(to_view).collect())
    }

    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductView>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        find_view(&mut conn, id).await
    }

    async fn insert(&self, product: &NewProduct) -> Result<ProductView, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let id: i32 = diesel::insert_into(products::table)
            .values(NewProductRow::from(product))
            .returning(products::id)
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        find_view(&mut conn, id)
            .await?
            .ok_or_else(|| ProductRepositoryError::query("inserted product vanished"))
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<ProductView>, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        if !patch.is_empty() {
            let updated = diesel::update(products::table.find(id))
                .set(ProductChangeset::from(patch))
                .execute(&mut conn)
                .await
                .map_err(diesel_error)?;
            if updated == 0 {
                return Ok(None);
            }
        }
        find_view(&mut conn, id).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(products::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
