// ABOUTME: Server bootstrap for the knowledge base
// ABOUTME: Opens the question store, builds the router with CORS and serves until Ctrl-C

use axum::http::{HeaderValue, Method};
use kb_api::{create_router, ApiState};
use kb_storage::{SqliteQuestionStore, StorageConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

pub mod config;

pub use config::{Config, ConfigError};


/// Build the CORS layer for the configured browser origin
pub fn cors_layer(origin: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([Method::GET, Method::POST, Method::PATCH])
        .allow_headers(Any))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let storage_config = StorageConfig {
        path: config.database_path.clone(),
        max_connections: config.max_connections,
        ..StorageConfig::default()
    };

    info!("Opening database at {}", storage_config.path.display());
    let store = SqliteQuestionStore::connect(&storage_config).await?;

    let app = create_router(ApiState::new(Arc::new(store))).layer(cors_layer(&config.cors_origin)?);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("CORS origin: {}", config.cors_origin);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
