use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Connect using a MongoConfig and return the configured database handle
///
/// The connection is verified with a `ping` before returning, so an
/// unreachable server surfaces here rather than on the first request.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, connect_from_config};
///
/// let config = MongoConfig::new("mongodb://localhost:27017", "lobster");
/// let (client, db) = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<(Client, Database)> {
    let (Some(url), Some(database)) = (config.url(), config.database()) else {
        return Err(DatabaseError::Unavailable(
            "DATABASE_URL and DATABASE_NAME must both be set".to_string(),
        ));
    };

    info!(
        "Attempting to connect to MongoDB at {}",
        config.redacted_url().unwrap_or_default()
    );

    let mut options = ClientOptions::parse(url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    let db = client.database(database);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %database, "Successfully connected to MongoDB");
    Ok((client, db))
}
