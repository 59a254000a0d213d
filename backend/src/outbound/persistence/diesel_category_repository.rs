//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.
//!
//! Views are assembled in two extra round trips per read: one for parent
//! names and one for owned product ids. Descendant and product cleanup on
//! delete is left to the `ON DELETE CASCADE` foreign keys.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::{
    CatalogSnapshot, Category, CategoryId, CategoryPatch, CategoryRef, CategoryView, NewCategory,
    Product,
};

use super::diesel_error_mapping::{ErrorConstructors, map_diesel_error, map_pool_error};
use super::models::{CategoryChangeset, CategoryRow, NewCategoryRow, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::{categories, products};

/// Diesel-backed implementation of the `CategoryRepository` port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CategoryRepositoryError {
    map_pool_error(error, CategoryRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CategoryRepositoryError {
    map_diesel_error(
        error,
        ErrorConstructors {
            query: CategoryRepositoryError::query,
            connection: CategoryRepositoryError::connection,
            integrity: CategoryRepositoryError::integrity,
        },
    )
}

/// Resolve parent references and product ids for a batch of rows.
async fn load_views(
    conn: &mut AsyncPgConnection,
    rows: Vec<CategoryRow>,
) -> Result<Vec<CategoryView>, CategoryRepositoryError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let parent_ids: Vec<i32> = rows.iter().filter_map(|row| row.parent_id).collect();

    let parents: HashMap<i32, String> = categories::table
        .filter(categories::id.eq_any(parent_ids))
        .select((categories::id, categories::name))
        .load::<(i32, String)>(conn)
        .await
        .map_err(diesel_error)?
        .into_iter()
        .collect();

    let owned: Vec<(i32, i32)> = products::table
        .filter(products::category_id.eq_any(ids))
        .select((products::category_id, products::id))
        .order(products::id.asc())
        .load(conn)
        .await
        .map_err(diesel_error)?;
    let mut product_ids: HashMap<i32, Vec<i32>> = HashMap::new();
    for (category_id, product_id) in owned {
        product_ids.entry(category_id).or_default().push(product_id);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let parent = row.parent_id.and_then(|parent_id| {
                parents.get(&parent_id).map(|name| CategoryRef {
                    id: parent_id,
                    name: name.clone(),
                })
            });
            let owned_ids = product_ids.remove(&row.id).unwrap_or_default();
            CategoryView::from_parts(Category::from(row), parent, owned_ids)
        })
        .collect())
}

async fn load_view(
    conn: &mut AsyncPgConnection,
    row: CategoryRow,
) -> Result<CategoryView, CategoryRepositoryError> {
    load_views(conn, vec![row])
        .await?
        .pop()
        .ok_or_else(|| CategoryRepositoryError::query("category view could not be assembled"))
}

async fn find_row(
    conn: &mut AsyncPgConnection,
    id: CategoryId,
) -> Result<Option<CategoryRow>, CategoryRepositoryError> {
    categories::table
        .find(id)
        .select(CategoryRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(diesel_error)
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list_active(&self) -> Result<Vec<CategoryView>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = categories::table
            .filter(categories::is_active.eq(true))
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        load_views(&mut conn, rows).await
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        match find_row(&mut conn, id).await? {
            Some(row) => load_view(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn insert(
        &self,
        category: &NewCategory,
    ) -> Result<CategoryView, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = diesel::insert_into(categories::table)
            .values(NewCategoryRow::from(category))
            .returning(CategoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        load_view(&mut conn, row).await
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = if patch.is_empty() {
            find_row(&mut conn, id).await?
        } else {
            diesel::update(categories::table.find(id))
                .set(CategoryChangeset::from(patch))
                .returning(CategoryRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?
        };
        match row {
            Some(row) => load_view(&mut conn, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(categories::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn snapshot(&self) -> Result<CatalogSnapshot, CategoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let category_rows = categories::table
            .order(categories::id.asc())
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        let product_rows = products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(CatalogSnapshot {
            categories: category_rows.into_iter().map(Category::from).collect(),
            products: product_rows.into_iter().map(Product::from).collect(),
        })
    }
}
