//! Internal Diesel row structs for the catalogue tables.
//!
//! These types never leave the persistence layer; adapters convert them into
//! domain entities before returning.

use diesel::prelude::*;

use crate::domain::{Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch};

use super::schema::{categories, products};

/// Row struct for reading from the categories table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub parent_id: Option<i32>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            is_active: row.is_active,
            parent_id: row.parent_id,
        }
    }
}

/// Insertable struct for new categories. `is_active` uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = categories)]
pub(crate) struct NewCategoryRow<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub parent_id: Option<i32>,
}

impl<'a> From<&'a NewCategory> for NewCategoryRow<'a> {
    fn from(category: &'a NewCategory) -> Self {
        Self {
            name: category.name.as_ref(),
            slug: category.slug.as_ref(),
            parent_id: category.parent_id,
        }
    }
}

/// Changeset for partial category updates.
///
/// `parent_id: Some(None)` writes `NULL`; `None` skips the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = categories)]
pub(crate) struct CategoryChangeset<'a> {
    pub name: Option<&'a str>,
    pub is_active: Option<bool>,
    pub parent_id: Option<Option<i32>>,
}

impl<'a> From<&'a CategoryPatch> for CategoryChangeset<'a> {
    fn from(patch: &'a CategoryPatch) -> Self {
        Self {
            name: patch.name.as_ref().map(|name| name.as_ref()),
            is_active: patch.is_active,
            parent_id: patch.parent_id,
        }
    }
}

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub price: f64,
    pub in_stock: bool,
    pub category_id: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            slug: row.slug,
            price: row.price,
            is_active: row.is_active,
            in_stock: row.in_stock,
            category_id: row.category_id,
        }
    }
}

/// Insertable struct for new products. Flags use the column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub price: f64,
    pub category_id: i32,
}

impl<'a> From<&'a NewProduct> for NewProductRow<'a> {
    fn from(product: &'a NewProduct) -> Self {
        Self {
            name: product.name.as_ref(),
            slug: product.slug.as_ref(),
            price: product.price.value(),
            category_id: product.category_id,
        }
    }
}

/// Changeset for partial product updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangeset<'a> {
    pub name: Option<&'a str>,
    pub slug: Option<&'a str>,
    pub price: Option<f64>,
    pub category_id: Option<i32>,
}

impl<'a> From<&'a ProductPatch> for ProductChangeset<'a> {
    fn from(patch: &'a ProductPatch) -> Self {
        Self {
            name: patch.name().map(|name| name.as_ref()),
            slug: patch.slug().map(|slug| slug.as_ref()),
            price: patch.price().map(|price| price.value()),
            category_id: patch.category_id(),
        }
    }
}
