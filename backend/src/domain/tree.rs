//! Derived hierarchy views over a loaded catalogue.
//!
//! Categories and products are held in flat collections (storage order) and
//! related through id-keyed indexes. Two views are built from them:
//!
//! - [`build_product_tree`]: nested tree under one category, restricted to
//!   active categories and active products.
//! - [`build_flat_tree`]: every category followed by all of its products,
//!   ignoring the active flags.
//!
//! Parent links are mutable data and may form cycles. The nested builder
//! keeps a visited set and reports [`TreeError::CycleDetected`] instead of
//! recursing forever.

use std::collections::{HashMap, HashSet};

use tracing::{instrument, warn};

use super::{Category, CategoryId, Product, ProductId};

/// All categories and products, in storage order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// Product entry embedded in a nested tree node.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

/// Node of the nested category tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTree {
    pub id: CategoryId,
    pub name: String,
    pub products: Vec<ProductSummary>,
    pub children: Vec<CategoryTree>,
}

/// Kind tag of a flat tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Category,
    Product,
}

/// Entry of the flat tree.
///
/// For categories `parent_id` is the parent category (or `None` for roots)
/// and `price` is `None`; for products `parent_id` is the owning category.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatNode {
    pub id: i32,
    pub name: String,
    pub price: Option<f64>,
    pub kind: NodeKind,
    pub parent_id: Option<CategoryId>,
}

/// Failures raised while building the nested tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("category {id} not found")]
    RootNotFound { id: CategoryId },
    #[error("category {category_id} is its own ancestor")]
    CycleDetected { category_id: CategoryId },
}

/// Id-keyed lookups over a snapshot. Borrowed, so building is allocation-light.
struct CatalogIndex<'a> {
    by_id: HashMap<CategoryId, &'a Category>,
    children: HashMap<CategoryId, Vec<&'a Category>>,
    products: HashMap<CategoryId, Vec<&'a Product>>,
}

impl<'a> CatalogIndex<'a> {
    fn new(snapshot: &'a CatalogSnapshot) -> Self {
        let mut by_id = HashMap::with_capacity(snapshot.categories.len());
        let mut children: HashMap<CategoryId, Vec<&'a Category>> = HashMap::new();
        for category in &snapshot.categories {
            by_id.insert(category.id, category);
            if let Some(parent_id) = category.parent_id {
                children.entry(parent_id).or_default().push(category);
            }
        }

        let mut products: HashMap<CategoryId, Vec<&'a Product>> = HashMap::new();
        for product in &snapshot.products {
            products.entry(product.category_id).or_default().push(product);
        }

        Self {
            by_id,
            children,
            products,
        }
    }

    fn children_of(&self, id: CategoryId) -> &[&'a Category] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    fn products_of(&self, id: CategoryId) -> &[&'a Product] {
        self.products.get(&id).map_or(&[], Vec::as_slice)
    }
}

/// Build the nested tree rooted at `root_id`.
///
/// The root itself is returned even when inactive; below it, inactive
/// categories are pruned together with their whole subtree and inactive
/// products are omitted.
///
/// # Examples
/// ```
/// use catalog::domain::{build_product_tree, CatalogSnapshot, Category};
///
/// let snapshot = CatalogSnapshot {
///     categories: vec![Category {
///         id: 1,
///         name: "Electronics".into(),
///         slug: "electronics".into(),
///         is_active: true,
///         parent_id: None,
///     }],
///     products: vec![],
/// };
/// let tree = build_product_tree(&snapshot, 1).expect("root exists");
/// assert!(tree.children.is_empty());
/// ```
#[instrument(level = "debug", skip(snapshot), fields(categories = snapshot.categories.len()))]
pub fn build_product_tree(
    snapshot: &CatalogSnapshot,
    root_id: CategoryId,
) -> Result<CategoryTree, TreeError> {
    let index = CatalogIndex::new(snapshot);
    let root = index
        .by_id
        .get(&root_id)
        .copied()
        .ok_or(TreeError::RootNotFound { id: root_id })?;
    let mut visited = HashSet::new();
    build_node(&index, root, &mut visited)
}

fn build_node(
    index: &CatalogIndex<'_>,
    category: &Category,
    visited: &mut HashSet<CategoryId>,
) -> Result<CategoryTree, TreeError> {
    if !visited.insert(category.id) {
        warn!(category_id = category.id, "cycle in category hierarchy");
        return Err(TreeError::CycleDetected {
            category_id: category.id,
        });
    }

    let products = index
        .products_of(category.id)
        .iter()
        .filter(|product| product.is_active)
        .map(|product| ProductSummary {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
        })
        .collect();

    let children = index
        .children_of(category.id)
        .iter()
        .filter(|child| child.is_active)
        .map(|child| build_node(index, child, visited))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CategoryTree {
        id: category.id,
        name: category.name.clone(),
        products,
        children,
    })
}

/// Flatten the whole catalogue into one sequence.
///
/// Each category is emitted in storage order and is immediately followed by
/// all of its products, active or not.
pub fn build_flat_tree(snapshot: &CatalogSnapshot) -> Vec<FlatNode> {
    let index = CatalogIndex::new(snapshot);
    let mut flat = Vec::with_capacity(snapshot.categories.len() + snapshot.products.len());

    for category in &snapshot.categories {
        flat.push(FlatNode {
            id: category.id,
            name: category.name.clone(),
            price: None,
            kind: NodeKind::Category,
            parent_id: category.parent_id,
        });
        flat.extend(index.products_of(category.id).iter().map(|product| FlatNode {
            id: product.id,
            name: product.name.clone(),
            price: Some(product.price),
            kind: NodeKind::Product,
            parent_id: Some(category.id),
        }));
    }

    flat
}
