//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against any storage without I/O.

use std::sync::Arc;

use crate::domain::ports::{CategoryCommand, CategoryQuery, ProductCommand, ProductQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories: Arc<dyn CategoryCommand>,
    pub categories_query: Arc<dyn CategoryQuery>,
    pub products: Arc<dyn ProductCommand>,
    pub products_query: Arc<dyn ProductQuery>,
}

impl HttpState {
    /// Bundle the category and product ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use catalog::domain::{CategoryService, ProductService};
    /// use catalog::inbound::http::state::HttpState;
    /// use catalog::outbound::memory::InMemoryCatalog;
    ///
    /// let store = Arc::new(InMemoryCatalog::new());
    /// let categories = Arc::new(CategoryService::new(Arc::clone(&store)));
    /// let products = Arc::new(ProductService::new(store));
    /// let state = HttpState::new(categories.clone(), categories, products.clone(), products);
    /// let _query = state.categories_query.clone();
    /// ```
    pub fn new(
        categories: Arc<dyn CategoryCommand>,
        categories_query: Arc<dyn CategoryQuery>,
        products: Arc<dyn ProductCommand>,
        products_query: Arc<dyn ProductQuery>,
    ) -> Self {
        Self {
            categories,
            categories_query,
            products,
            products_query,
        }
    }
}
