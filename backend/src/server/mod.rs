//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::WrapErr;
use tracing::info;

use catalog::Trace;
#[cfg(debug_assertions)]
use catalog::doc::ApiDoc;
use catalog::domain::{CategoryService, ProductService};
use catalog::inbound::http;
use catalog::inbound::http::health::HealthState;
use catalog::inbound::http::state::HttpState;
use catalog::outbound::memory::InMemoryCatalog;
use catalog::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselProductRepository, run_pending_migrations,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire services over PostgreSQL when a database URL is configured, over the
/// in-memory store otherwise.
async fn build_http_state(settings: &ServerSettings) -> color_eyre::Result<HttpState> {
    let Some(pool_config) = settings.pool_config() else {
        info!("no database configured, using in-memory store");
        let store = Arc::new(InMemoryCatalog::new());
        let categories = Arc::new(CategoryService::new(Arc::clone(&store)));
        let products = Arc::new(ProductService::new(store));
        return Ok(HttpState::new(
            categories.clone(),
            categories,
            products.clone(),
            products,
        ));
    };

    if settings.run_migrations() {
        run_pending_migrations(pool_config.database_url())
            .await
            .wrap_err("failed to apply database migrations")?;
    }

    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build database pool")?;
    let categories = Arc::new(CategoryService::new(Arc::new(
        DieselCategoryRepository::new(pool.clone()),
    )));
    let products = Arc::new(ProductService::new(Arc::new(DieselProductRepository::new(
        pool,
    ))));
    Ok(HttpState::new(
        categories.clone(),
        categories,
        products.clone(),
        products,
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(NormalizePath::trim())
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Construct the HTTP server and mark it ready once bound.
///
/// # Errors
///
/// Fails when storage cannot be prepared or the listener cannot bind.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> color_eyre::Result<Server> {
    let bind_addr = settings.bind_addr()?;
    let http_state = web::Data::new(build_http_state(settings).await?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?
        .run();

    info!(%bind_addr, "catalog server listening");
    health_state.mark_ready();
    Ok(server)
}
