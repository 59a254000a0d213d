//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, test, web};

use crate::Trace;
use crate::domain::{CategoryService, ProductService};
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryCatalog;

/// HTTP state backed by a fresh in-memory store.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryCatalog::new());
    let categories = Arc::new(CategoryService::new(Arc::clone(&store)));
    let products = Arc::new(ProductService::new(store));
    HttpState::new(categories.clone(), categories, products.clone(), products)
}

/// Initialise the full route table with the production middleware stack.
pub async fn init_app(
    state: HttpState,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::Data::new(HealthState::new()))
            .wrap(Trace)
            .wrap(NormalizePath::trim())
            .configure(super::configure),
    )
    .await
}
