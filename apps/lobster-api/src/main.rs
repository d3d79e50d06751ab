//! Lobster API - freshwater lobster catalog and lead capture over REST

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{DocumentStore, MongoDocumentStore};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if let Some(url) = config.mongodb.redacted_url() {
        info!("Connecting to MongoDB at {}", url);
    }

    // Never fails: without settings or a reachable server the store is degraded
    let store = MongoDocumentStore::connect(&config.mongodb).await;
    match store.database_name() {
        Some(name) => info!("Using MongoDB database: {}", name),
        None => warn!("No database handle; data endpoints will return errors"),
    }

    let state = AppState {
        config: config.clone(),
        store,
    };

    let root = api::root_routes(&state);
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(root, api_routes)?;

    info!(
        "Starting {} v{} on {}",
        config.app.name,
        config.app.version,
        config.server.address()
    );

    create_production_app(router, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: releasing MongoDB handle");
        drop(state);
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Lobster API shutdown complete");
    Ok(())
}
