//! Application setup and initialization

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use resizer_core::{Component, Config};
use resizer_storage::create_storage;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.is_production())?;

    tracing::info!(
        environment = %config.environment,
        issuer = config.serves(Component::Issuer),
        worker = config.serves(Component::Worker),
        "Configuration loaded"
    );

    if config.serves(Component::Issuer) {
        if let Err(e) = config.issuer.settings() {
            tracing::warn!(error = %e, "Issuer is mounted but not configured");
        }
    }
    if config.serves(Component::Worker) {
        if let Err(e) = config.worker.destination_bucket() {
            tracing::warn!(error = %e, "Worker is mounted but not configured");
        }
    }

    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(&config.storage)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(backend = %storage.backend_type(), "Storage initialized");

    let state = Arc::new(AppState::new(config, storage));
    let router = routes::setup_routes(config, state.clone());

    Ok((state, router))
}
