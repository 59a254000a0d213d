//! Catalogue domain: entities, validation, tree views, ports and services.
//!
//! Public surface:
//! - `Category`, `Product` and their views and write payloads.
//! - `CatalogName`, `Slug`, `Price` value objects.
//! - `build_product_tree`, `build_flat_tree` derived hierarchy views.
//! - `Error`, `ErrorCode` transport-agnostic failures.
//! - `CategoryService`, `ProductService` implementing the driving ports.

mod category;
mod category_service;
pub mod error;
mod name;
pub mod ports;
mod product;
mod product_service;
mod slug;
pub mod trace_id;
pub mod tree;
pub(crate) mod validation;

pub use self::category::{
    Category, CategoryId, CategoryPatch, CategoryRef, CategoryView, NewCategory,
};
pub use self::category_service::CategoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::name::{
    CatalogName, FORBIDDEN_NAME_CHARS, NAME_MAX, NAME_MIN, NameValidationError,
    contains_forbidden_characters, has_valid_length,
};
pub use self::product::{
    NewProduct, Price, PriceValidationError, Product, ProductId, ProductPatch, ProductView,
};
pub use self::product_service::ProductService;
pub use self::slug::{Slug, SlugError, is_valid_slug};
pub use self::trace_id::TraceId;
pub use self::tree::{
    CatalogSnapshot, CategoryTree, FlatNode, NodeKind, ProductSummary, TreeError,
    build_flat_tree, build_product_tree,
};
