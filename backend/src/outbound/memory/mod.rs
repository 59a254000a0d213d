//! In-process catalogue store implementing both repository ports.
//!
//! Rows live in id-keyed maps behind a single mutex, so a `BTreeMap`
//! iteration yields storage (ascending id) order. The store enforces the
//! same constraints as the relational schema:
//!
//! - slugs are unique per entity kind;
//! - `parent_id` and `category_id` must reference an existing category;
//! - deleting a category removes its descendants and all their products.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, ProductRepository, ProductRepositoryError,
};
use crate::domain::{
    CatalogSnapshot, Category, CategoryId, CategoryPatch, CategoryRef, CategoryView, NewCategory,
    NewProduct, Product, ProductId, ProductPatch, ProductView,
};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, Category>,
    products: BTreeMap<ProductId, Product>,
    last_category_id: CategoryId,
    last_product_id: ProductId,
}

impl Tables {
    fn category_view(&self, category: &Category) -> CategoryView {
        let parent = category
            .parent_id
            .and_then(|parent_id| self.categories.get(&parent_id))
            .map(|parent| CategoryRef {
                id: parent.id,
                name: parent.name.clone(),
            });
        let product_ids = self
            .products
            .values()
            .filter(|product| product.category_id == category.id)
            .map(|product| product.id)
            .collect();
        CategoryView::from_parts(category.clone(), parent, product_ids)
    }

    fn product_view(&self, product: &Product) -> ProductView {
        let category_name = self
            .categories
            .get(&product.category_id)
            .map(|category| category.name.clone());
        ProductView::from_parts(product.clone(), category_name)
    }

    fn category_slug_taken(&self, slug: &str) -> bool {
        self.categories.values().any(|category| category.slug == slug)
    }

    fn product_slug_taken(&self, slug: &str, except: Option<ProductId>) -> bool {
        self.products
            .values()
            .any(|product| product.slug == slug && Some(product.id) != except)
    }

    fn has_category(&self, id: CategoryId) -> bool {
        self.categories.contains_key(&id)
    }

    /// Collect `root` and every category reachable below it.
    fn subtree(&self, root: CategoryId) -> BTreeSet<CategoryId> {
        let mut found = BTreeSet::from([root]);
        let mut pending = vec![root];
        while let Some(current) = pending.pop() {
            for child in self.categories.values() {
                if child.parent_id == Some(current) && found.insert(child.id) {
                    pending.push(child.id);
                }
            }
        }
        found
    }
}

/// Arena-style catalogue store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    tables: Mutex<Tables>,
}

impl InMemoryCatalog {
    /// Create an empty store. Ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory catalogue lock poisoned".to_owned())
    }
}

fn missing_parent(id: CategoryId) -> CategoryRepositoryError {
    CategoryRepositoryError::integrity(format!("parent category {id} does not exist"))
}

fn missing_category(id: CategoryId) -> ProductRepositoryError {
    ProductRepositoryError::integrity(format!("category {id} does not exist"))
}

#[async_trait]
impl CategoryRepository for InMemoryCatalog {
    async fn list_active(&self) -> Result<Vec<CategoryView>, CategoryRepositoryError> {
        let tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        Ok(tables
            .categories
            .values()
            .filter(|category| category.is_active)
            .map(|category| tables.category_view(category))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError> {
        let tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        Ok(tables
            .categories
            .get(&id)
            .map(|category| tables.category_view(category)))
    }

    async fn insert(
        &self,
        category: &NewCategory,
    ) -> Result<CategoryView, CategoryRepositoryError> {
        let mut tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        if tables.category_slug_taken(category.slug.as_ref()) {
            return Err(CategoryRepositoryError::integrity(format!(
                "category slug {} already exists",
                category.slug
            )));
        }
        if let Some(parent_id) = category.parent_id {
            if !tables.has_category(parent_id) {
                return Err(missing_parent(parent_id));
            }
        }

        tables.last_category_id += 1;
        let row = Category {
            id: tables.last_category_id,
            name: category.name.to_string(),
            slug: category.slug.to_string(),
            is_active: true,
            parent_id: category.parent_id,
        };
        let view = tables.category_view(&row);
        tables.categories.insert(row.id, row);
        debug!(category_id = view.id, "inserted category");
        Ok(view)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Option<CategoryView>, CategoryRepositoryError> {
        let mut tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        if let Some(Some(parent_id)) = patch.parent_id {
            if !tables.has_category(parent_id) {
                return Err(missing_parent(parent_id));
            }
        }
        let Some(row) = tables.categories.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(row);
        let row = row.clone();
        Ok(Some(tables.category_view(&row)))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, CategoryRepositoryError> {
        let mut tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        if !tables.has_category(id) {
            return Ok(false);
        }
        let doomed = tables.subtree(id);
        tables.categories.retain(|id, _| !doomed.contains(id));
        tables
            .products
            .retain(|_, product| !doomed.contains(&product.category_id));
        debug!(category_id = id, removed = doomed.len(), "deleted category subtree");
        Ok(true)
    }

    async fn snapshot(&self) -> Result<CatalogSnapshot, CategoryRepositoryError> {
        let tables = self.lock().map_err(CategoryRepositoryError::connection)?;
        Ok(CatalogSnapshot {
            categories: tables.categories.values().cloned().collect(),
            products: tables.products.values().cloned().collect(),
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalog {
    async fn list_active(&self) -> Result<Vec<ProductView>, ProductRepositoryError> {
        let tables = self.lock().map_err(ProductRepositoryError::connection)?;
        Ok(tables
            .products
            .values()
            .filter(|product| product.is_active)
            .map(|product| tables.product_view(product))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: ProductId,
    ) -> Result<Option<ProductView>, ProductRepositoryError> {
        let tables = self.lock().map_err(ProductRepositoryError::connection)?;
        Ok(tables
            .products
            .get(&id)
            .map(|product| tables.product_view(product)))
    }

    async fn insert(&self, product: &NewProduct) -> Result<ProductView, ProductRepositoryError> {
        let mut tables = self.lock().map_err(ProductRepositoryError::connection)?;
        if tables.product_slug_taken(product.slug.as_ref(), None) {
            return Err(ProductRepositoryError::integrity(format!(
                "product slug {} already exists",
                product.slug
            )));
        }
        if !tables.has_category(product.category_id) {
            return Err(missing_category(product.category_id));
        }

        tables.last_product_id += 1;
        let row = Product {
            id: tables.last_product_id,
            name: product.name.to_string(),
            slug: product.slug.to_string(),
            price: product.price.value(),
            is_active: true,
            in_stock: true,
            category_id: product.category_id,
        };
        let view = tables.product_view(&row);
        tables.products.insert(row.id, row);
        debug!(product_id = view.id, "inserted product");
        Ok(view)
    }

    async fn update(
        &self,
        id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<ProductView>, ProductRepositoryError> {
        let mut tables = self.lock().map_err(ProductRepositoryError::connection)?;
        if !tables.products.contains_key(&id) {
            return Ok(None);
        }
        if let Some(slug) = patch.slug() {
            if tables.product_slug_taken(slug.as_ref(), Some(id)) {
                return Err(ProductRepositoryError::integrity(format!(
                    "product slug {slug} already exists"
                )));
            }
        }
        if let Some(category_id) = patch.category_id() {
            if !tables.has_category(category_id) {
                return Err(missing_category(category_id));
            }
        }
        let Some(row) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        patch.apply_to(row);
        let row = row.clone();
        Ok(Some(tables.product_view(&row)))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, ProductRepositoryError> {
        let mut tables = self.lock().map_err(ProductRepositoryError::connection)?;
        Ok(tables.products.remove(&id).is_some())
    }
}
