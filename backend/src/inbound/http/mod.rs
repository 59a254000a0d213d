//! HTTP inbound adapter exposing the catalogue REST endpoints.

pub mod categories;
pub mod error;
pub mod health;
pub mod json;
pub mod products;
pub mod root;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the JSON extractor settings, the landing document, and the
/// category, product and health routes.
///
/// `HttpState` and `HealthState` must be provided as `web::Data` by the
/// caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json::json_config())
        .service(root::welcome)
        .service(health::ready)
        .service(health::live)
        .configure(categories::configure)
        .configure(products::configure);
}
