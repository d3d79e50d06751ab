//! MongoDB database connector and document-store adapter
//!
//! Provides connection management, health checks and the generic
//! [`DocumentStore`] used by the domain layer.

mod config;
mod connector;
mod health;
mod store;

pub use config::MongoConfig;
pub use connector::connect_from_config;
pub use health::{HealthStatus, check_health_detailed};
pub use store::{DocumentStore, MongoDocumentStore, id_to_string, stamp_timestamps};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Database, bson};
