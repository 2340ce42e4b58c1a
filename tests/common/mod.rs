use std::sync::Arc;

use reqwest::Client;
use tempfile::TempDir;
use tokio::net::TcpListener;

use cleansite_rs::observability::Metrics;
use cleansite_rs::repositories::{DiskImageStore, JsonFileRepository};
use cleansite_rs::services::CatalogService;

const MAX_UPLOAD_BYTES: usize = 85 * 1024 * 1024;

/// Full application served on an ephemeral port with temporary storage
pub struct TestEnvironment {
    pub client: Client,
    pub base_url: String,
    // Dropping the tempdir removes the data file and image store
    _storage: TempDir,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let storage = tempfile::tempdir().expect("Failed to create temp storage");
        let images_dir = storage.path().join("images");

        let repository = Arc::new(
            JsonFileRepository::open(storage.path().join("services.json"))
                .await
                .expect("Failed to open repository"),
        );
        let images = Arc::new(
            DiskImageStore::open(images_dir.clone())
                .await
                .expect("Failed to open image store"),
        );
        let catalog = Arc::new(CatalogService::new(repository, images));
        let metrics = Arc::new(Metrics::new().expect("Failed to create metrics"));

        let app = cleansite_rs::create_app(metrics, catalog, &images_dir, MAX_UPLOAD_BYTES);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Server failed to start");
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{}", addr),
            _storage: storage,
        }
    }
}

/// Multipart form with all required text fields for creating a service
pub fn service_form(name: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("homeShortDescription", format!("{name} at home"))
        .text("detailsShortDescription", format!("{name} in detail"))
        .text("description", format!("Full description of {name}"))
        .text("imageDetails", r#"["front view"]"#)
        .text("features", r#"["eco friendly"]"#)
}

/// Attach an in-memory file part under the given field name
pub fn with_image(
    form: reqwest::multipart::Form,
    field: &str,
    filename: &str,
    bytes: Vec<u8>,
) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str("image/jpeg")
        .expect("Invalid mime type");
    form.part(field.to_string(), part)
}
