#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_optional, env_parse_or};

/// MongoDB database configuration
///
/// Both `url` and `database` are optional: when either is missing the
/// service still starts, but the document store runs in degraded mode.
///
/// # Example
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017", "lobster");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// MongoDB connection URL
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: Option<String>,

    /// Database name to use
    pub database: Option<String>,

    /// Optional application name for server logs
    pub app_name: Option<String>,

    /// Maximum number of connections in the pool
    pub max_pool_size: u32,

    /// Minimum number of connections in the pool
    pub min_pool_size: u32,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Server selection timeout in seconds
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// Create a config pointing at `url` and using `database`
    pub fn new(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            database: Some(database.into()),
            ..Self::default()
        }
    }

    /// A config with no connection settings; connecting with it yields a degraded store
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Set the application name for server logs
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Get the MongoDB URL, if set
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Get the database name, if set
    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Whether the connection-string setting is present
    pub fn has_url(&self) -> bool {
        self.url.is_some()
    }

    /// Whether enough is configured to attempt a connection
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.database.is_some()
    }

    /// URL with any credentials masked, safe for logs
    pub fn redacted_url(&self) -> Option<String> {
        self.url.as_deref().map(redact_credentials)
    }
}

fn redact_credentials(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{}://***@{}", scheme, &rest[at + 1..]),
        None => url.to_string(),
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: None,
            database: None,
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 0,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 5,
        }
    }
}

/// Load MongoConfig from environment variables
///
/// Environment variables:
/// - `DATABASE_URL` or `MONGODB_URL` (optional) - MongoDB connection string
/// - `DATABASE_NAME` or `MONGODB_DATABASE` (optional) - Database name
/// - `MONGODB_APP_NAME` (optional) - Application name for server logs
/// - `MONGODB_MAX_POOL_SIZE` (optional, default: 100)
/// - `MONGODB_MIN_POOL_SIZE` (optional, default: 0)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (optional, default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (optional, default: 5)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: env_optional("DATABASE_URL").or_else(|| env_optional("MONGODB_URL")),
            database: env_optional("DATABASE_NAME").or_else(|| env_optional("MONGODB_DATABASE")),
            app_name: env_optional("MONGODB_APP_NAME"),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: env_parse_or(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}
