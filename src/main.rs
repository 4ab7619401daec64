use std::sync::Arc;

use image_upload_service::{
    adapters::{
        router::{cors_layer, create_router},
        state::AppState,
    },
    domain::config::{server::ServerConfig, upload::UploadConfig},
    services::LocalDiskStorage,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let server_config =
        ServerConfig::from_env().expect("ERROR: invalid server configuration");
    let upload_config =
        UploadConfig::from_env().expect("ERROR: invalid upload configuration");

    let storage = LocalDiskStorage::new(upload_config.upload_dir.clone())
        .await
        .expect("ERROR: Failed to prepare upload directory");

    tracing::info!(
        "Storing uploads in {} (max {} bytes per file, fields: {})",
        storage.root().display(),
        upload_config.max_file_size,
        upload_config.file_fields.join(", ")
    );

    let cors = cors_layer(&server_config);
    let app_state = AppState::new(upload_config, Arc::new(storage));
    let router = create_router(app_state, cors);

    // Start the server
    let listener = tokio::net::TcpListener::bind(server_config.bind_address())
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on {}", server_config.bind_address());

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
