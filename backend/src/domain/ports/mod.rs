//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are consumed by inbound adapters.
//! Driven ports (`*Repository`) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod category_command;
mod category_query;
mod category_repository;
mod product_command;
mod product_query;
mod product_repository;

#[cfg(test)]
pub use category_command::MockCategoryCommand;
pub use category_command::{CategoryCommand, CreateCategoryRequest, UpdateCategoryRequest};
#[cfg(test)]
pub use category_query::MockCategoryQuery;
pub use category_query::CategoryQuery;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use product_command::MockProductCommand;
pub use product_command::{CreateProductRequest, ProductCommand, UpdateProductRequest};
#[cfg(test)]
pub use product_query::MockProductQuery;
pub use product_query::ProductQuery;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductRepository, ProductRepositoryError};
