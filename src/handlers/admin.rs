use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::handlers::api::service_error_to_response;
use crate::models::{
    validation, MessageResponse, ReorderRequest, Service, ServiceForm, UploadedImage,
};
use crate::services::CatalogService;

/// Admin state containing the catalog service
#[derive(Clone)]
pub struct AdminState {
    pub catalog: Arc<CatalogService>,
}

/// Create admin router with catalog management endpoints
pub fn create_admin_router(catalog: Arc<CatalogService>) -> Router {
    let state = AdminState { catalog };

    Router::new()
        .route("/api/services", post(create_service))
        // static segment has to be registered alongside the :service_id capture
        .route("/api/services/reorder", put(reorder_services))
        .route(
            "/api/services/:service_id",
            put(update_service).delete(delete_service),
        )
        .with_state(state)
}

/// Create a new service from a multipart form
#[instrument(name = "create_service", skip(state, multipart))]
pub async fn create_service(
    State(state): State<AdminState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Service>), (StatusCode, Json<Value>)> {
    let form = read_service_form(multipart).await?;

    crate::info_with_trace!(
        "Creating service: {}",
        form.name.as_deref().unwrap_or("<unnamed>")
    );

    match state.catalog.create(form).await {
        Ok(service) => {
            crate::info_with_trace!("Successfully created service with ID: {}", service.id);
            Ok((StatusCode::CREATED, Json(service)))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to create service: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Partially update an existing service from a multipart form
#[instrument(name = "update_service", skip(state, multipart), fields(service_id = %service_id))]
pub async fn update_service(
    State(state): State<AdminState>,
    Path(service_id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<Service>, (StatusCode, Json<Value>)> {
    let form = read_service_form(multipart).await?;

    crate::info_with_trace!("Updating service: {}", service_id);

    match state.catalog.update(service_id, form).await {
        Ok(service) => {
            crate::info_with_trace!("Successfully updated service: {}", service_id);
            Ok(Json(service))
        }
        Err(err) => {
            crate::error_with_trace!("Failed to update service {}: {}", service_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Delete a service
#[instrument(name = "delete_service", skip(state), fields(service_id = %service_id))]
pub async fn delete_service(
    State(state): State<AdminState>,
    Path(service_id): Path<u64>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<Value>)> {
    info!("Deleting service: {}", service_id);

    match state.catalog.delete(service_id).await {
        Ok(()) => {
            info!("Successfully deleted service: {}", service_id);
            Ok(Json(MessageResponse {
                message: "Service deleted successfully".to_string(),
            }))
        }
        Err(err) => {
            error!("Failed to delete service {}: {}", service_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Replace the stored service order wholesale
#[instrument(name = "reorder_services", skip(state, request), fields(count = request.ordered_ids.len()))]
pub async fn reorder_services(
    State(state): State<AdminState>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<MessageResponse>, (StatusCode, Json<Value>)> {
    info!("Replacing service order with {} ids", request.ordered_ids.len());

    match state.catalog.reorder(request.ordered_ids).await {
        Ok(services) => {
            info!("Successfully reordered {} services", services.len());
            Ok(Json(MessageResponse {
                message: "Service order updated successfully".to_string(),
            }))
        }
        Err(err) => {
            error!("Failed to reorder services: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Read a service form out of a multipart request.
///
/// Text parts carry the scalar fields; `imageDetails` and `features` arrive as
/// JSON-encoded string arrays; `mainImage` and `detailedImages` parts carry
/// file content.
async fn read_service_form(
    mut multipart: Multipart,
) -> Result<ServiceForm, (StatusCode, Json<Value>)> {
    let mut form = ServiceForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| upload_error(format!("Malformed multipart request: {err}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "name" => form.name = Some(read_text(field, &name).await?),
            "homeShortDescription" => {
                form.home_short_description = Some(read_text(field, &name).await?)
            }
            "detailsShortDescription" => {
                form.details_short_description = Some(read_text(field, &name).await?)
            }
            "description" => form.description = Some(read_text(field, &name).await?),
            "imageDetails" => form.image_details = read_string_array(field, &name).await?,
            "features" => form.features = read_string_array(field, &name).await?,
            "mainImage" => {
                if form.main_image.is_some() {
                    return Err(upload_error(format!(
                        "At most {} main image is allowed",
                        validation::MAX_MAIN_IMAGES
                    )));
                }
                form.main_image = Some(read_file(field, &name).await?);
            }
            "detailedImages" => {
                if form.detailed_images.len() >= validation::MAX_DETAILED_IMAGES {
                    return Err(upload_error(format!(
                        "At most {} detailed images are allowed",
                        validation::MAX_DETAILED_IMAGES
                    )));
                }
                form.detailed_images.push(read_file(field, &name).await?);
            }
            other => {
                warn!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, (StatusCode, Json<Value>)> {
    field
        .text()
        .await
        .map_err(|err| upload_error(format!("Failed to read field '{name}': {err}")))
}

/// Parse a JSON-encoded string array field; malformed JSON fails the request
/// rather than being silently dropped
async fn read_string_array(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<Vec<String>, (StatusCode, Json<Value>)> {
    let raw = read_text(field, name).await?;
    if raw.trim().is_empty() {
        return Ok(vec![]);
    }
    serde_json::from_str(&raw)
        .map_err(|err| upload_error(format!("Field '{name}' is not a JSON string array: {err}")))
}

async fn read_file(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<UploadedImage, (StatusCode, Json<Value>)> {
    let original_name = field.file_name().unwrap_or("upload").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|err| upload_error(format!("Failed to read file '{name}': {err}")))?;

    if bytes.len() > validation::MAX_IMAGE_BYTES {
        return Err(upload_error(format!(
            "File '{original_name}' exceeds the {} byte limit",
            validation::MAX_IMAGE_BYTES
        )));
    }

    Ok(UploadedImage {
        original_name,
        bytes: bytes.to_vec(),
    })
}

fn upload_error(message: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
