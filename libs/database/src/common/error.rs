/// Unified database error type for all storage operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Driver-level errors (network, rejected writes, cursor failures)
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// No database handle exists (connection string unset or server unreachable at startup)
    #[error("Database not available: {0}")]
    Unavailable(String),

    /// Connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Caller passed an argument the store cannot honor
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
