use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{ImageStats, Service, ServiceError};
use crate::services::CatalogService;

/// Shared application state for the read-only catalog endpoints
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<CatalogService>,
}

/// Create the public API router
pub fn create_api_router(catalog: Arc<CatalogService>) -> Router {
    let state = ApiState { catalog };

    Router::new()
        .route("/api/services", get(list_services))
        .route("/api/services/:service_id", get(get_service))
        .route("/api/services/:service_id/images-stats", get(image_stats))
        .with_state(state)
}

/// List all services in stored order
#[instrument(name = "list_services", skip(state))]
pub async fn list_services(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Service>>, (StatusCode, Json<Value>)> {
    info!("Listing services");

    match state.catalog.list().await {
        Ok(services) => {
            info!("Successfully listed {} services", services.len());
            Ok(Json(services))
        }
        Err(err) => {
            error!("Failed to list services: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a specific service by ID
#[instrument(name = "get_service", skip(state), fields(service_id = %service_id))]
pub async fn get_service(
    State(state): State<ApiState>,
    Path(service_id): Path<u64>,
) -> Result<Json<Service>, (StatusCode, Json<Value>)> {
    info!("Getting service with ID: {}", service_id);

    match state.catalog.get(service_id).await {
        Ok(service) => {
            info!("Successfully retrieved service: {}", service.name);
            Ok(Json(service))
        }
        Err(err) => {
            error!("Failed to get service {}: {}", service_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Image count and on-disk size summary for one service
#[instrument(name = "image_stats", skip(state), fields(service_id = %service_id))]
pub async fn image_stats(
    State(state): State<ApiState>,
    Path(service_id): Path<u64>,
) -> Result<Json<ImageStats>, (StatusCode, Json<Value>)> {
    info!("Computing image stats for service: {}", service_id);

    match state.catalog.image_stats(service_id).await {
        Ok(stats) => {
            info!(
                "Service {} has {} images totalling {} MB",
                service_id, stats.image_count, stats.total_size_mb
            );
            Ok(Json(stats))
        }
        Err(err) => {
            error!("Failed to compute image stats for {}: {}", service_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Convert ServiceError to HTTP response
pub(crate) fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match err {
        ServiceError::ServiceNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::ValidationError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::UploadError { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository { source } => match source {
            crate::models::RepositoryError::NotFound => {
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        },
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
