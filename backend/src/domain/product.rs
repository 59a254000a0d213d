//! Product read models and write payloads.

use std::fmt;

use super::{CatalogName, CategoryId, Slug, SlugError};

/// Identifier assigned by storage on insert.
pub type ProductId = i32;

/// Stored product row as seen by the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: f64,
    pub is_active: bool,
    pub in_stock: bool,
    pub category_id: CategoryId,
}

/// Product enriched with the name of its owning category.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category_id: CategoryId,
    pub category_name: Option<String>,
}

impl ProductView {
    /// Assemble a view from a product and its category name, if resolvable.
    pub fn from_parts(product: Product, category_name: Option<String>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            category_id: product.category_id,
            category_name,
        }
    }
}

/// Validation errors returned by [`Price::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum PriceValidationError {
    #[error("price must be a finite number")]
    NotFinite,
    #[error("price must not be negative, got {0}")]
    Negative(f64),
}

impl PriceValidationError {
    /// Stable code surfaced in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFinite => "price_not_finite",
            Self::Negative(_) => "price_negative",
        }
    }
}

/// Non-negative, finite product price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Validate and construct a price.
    ///
    /// # Examples
    /// ```
    /// use catalog::domain::Price;
    ///
    /// assert_eq!(Price::new(199.99).expect("valid").value(), 199.99);
    /// assert!(Price::new(-1.0).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, PriceValidationError> {
        if !value.is_finite() {
            return Err(PriceValidationError::NotFinite);
        }
        if value < 0.0 {
            return Err(PriceValidationError::Negative(value));
        }
        Ok(Self(value))
    }

    /// Raw price value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated payload for inserting a product.
///
/// New products are active and in stock.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: CatalogName,
    pub slug: Slug,
    pub price: Price,
    pub category_id: CategoryId,
}

impl NewProduct {
    /// Build the insert payload, deriving the slug from `name`.
    pub fn new(name: CatalogName, price: Price, category_id: CategoryId) -> Result<Self, SlugError> {
        let slug = Slug::from_name(&name)?;
        Ok(Self {
            name,
            slug,
            price,
            category_id,
        })
    }
}

/// Partial update for a product.
///
/// Unlike categories, renaming a product re-derives its slug, so `slug` is
/// present exactly when `name` is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    name: Option<CatalogName>,
    slug: Option<Slug>,
    price: Option<Price>,
    category_id: Option<CategoryId>,
}

impl ProductPatch {
    /// Build a patch, deriving the slug when a new name is supplied.
    pub fn new(
        name: Option<CatalogName>,
        price: Option<Price>,
        category_id: Option<CategoryId>,
    ) -> Result<Self, SlugError> {
        let slug = name.as_ref().map(Slug::from_name).transpose()?;
        Ok(Self {
            name,
            slug,
            price,
            category_id,
        })
    }

    /// Return `true` when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.category_id.is_none()
    }

    /// New name, if renaming.
    pub fn name(&self) -> Option<&CatalogName> {
        self.name.as_ref()
    }

    /// Slug derived from the new name, if renaming.
    pub fn slug(&self) -> Option<&Slug> {
        self.slug.as_ref()
    }

    /// New price, if any.
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// New owning category, if any.
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    /// Apply the patch to an in-memory product.
    pub fn apply_to(&self, product: &mut Product) {
        if let (Some(name), Some(slug)) = (&self.name, &self.slug) {
            product.name = name.to_string();
            product.slug = slug.to_string();
        }
        if let Some(price) = self.price {
            product.price = price.value();
        }
        if let Some(category_id) = self.category_id {
            product.category_id = category_id;
        }
    }
}
