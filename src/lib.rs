pub mod config;
pub mod engine;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;

pub use config::{Config, ConfigError};
pub use observability::{init_observability, shutdown_observability, Metrics};

use std::path::Path;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use handlers::{
    create_admin_router, create_api_router, health_check, metrics_handler,
    request_validation_middleware, security_headers_middleware,
};
use observability::observability_middleware;
use services::CatalogService;

/// Build the full application router.
///
/// Shared between the binary and the integration tests so both exercise the
/// same middleware stack.
pub fn create_app(
    metrics: Arc<Metrics>,
    catalog: Arc<CatalogService>,
    images_dir: &Path,
    max_upload_bytes: usize,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    Router::new()
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(create_api_router(catalog.clone()))
        .merge(create_admin_router(catalog))
        .nest_service("/images", ServeDir::new(images_dir))
        // Middleware layers, outer to inner
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_validation_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
