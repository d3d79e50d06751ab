//! Database library providing the MongoDB connector and document-store adapter
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{DocumentStore, MongoConfig, MongoDocumentStore};
//! use mongodb::bson::doc;
//!
//! let config = MongoConfig::new("mongodb://localhost:27017", "lobster");
//! // Never fails: an unreachable server yields a degraded store
//! let store = MongoDocumentStore::connect(&config).await;
//! let id = store.create_document("inquiry", doc! { "name": "Budi" }).await?;
//! let docs = store.get_documents("inquiry", 10).await?;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
