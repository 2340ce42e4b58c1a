use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use cleansite_rs::{
    create_app, init_observability,
    observability::Metrics,
    repositories::{DiskImageStore, JsonFileRepository},
    services::CatalogService,
    shutdown_observability, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    // Initialize comprehensive observability
    init_observability(
        &config.observability.service_name,
        &config.observability.service_version,
        config.observability.otlp_endpoint.as_deref().unwrap_or(""),
        config.observability.enable_json_logging,
    )?;

    info!("Starting cleansite-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );
    info!(
        "Storage: data_file={}, images_dir={}",
        config.storage.data_file.display(),
        config.storage.images_dir.display()
    );

    // Initialize metrics
    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    // Initialize storage
    let repository = Arc::new(JsonFileRepository::open(config.storage.data_file.clone()).await?);
    let images = Arc::new(DiskImageStore::open(config.storage.images_dir.clone()).await?);
    info!("Storage initialized successfully");

    let catalog = Arc::new(CatalogService::new(repository, images));
    info!("Services initialized successfully");

    // Build the application router
    let app = create_app(
        metrics,
        catalog,
        &config.storage.images_dir,
        config.server.max_upload_bytes,
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    // Set up graceful shutdown
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
        shutdown_observability().await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
