//! Application state management

use database::mongodb::MongoDocumentStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: MongoDocumentStore,
}

#[cfg(test)]
impl AppState {
    /// State with no database settings and no handle
    pub fn degraded() -> Self {
        use crate::config::{Config, Environment};
        use core_config::{app_info, server::ServerConfig};
        use database::mongodb::MongoConfig;

        Self {
            config: Config {
                app: app_info!(),
                mongodb: MongoConfig::unconfigured(),
                server: ServerConfig::default(),
                environment: Environment::Development,
            },
            store: MongoDocumentStore::unavailable(),
        }
    }
}
