//! Catalog Domain
//!
//! Lobster products, customer inquiries and the sample-data seed, stored in
//! a schemaless [`DocumentStore`](database::mongodb::DocumentStore).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, request validation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Listing, lead capture, seeding policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │DocumentStore│  ← Generic collections (database crate)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities and their schemas
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use database::mongodb::{MongoConfig, MongoDocumentStore};
//! use domain_catalog::{handlers, CatalogService};
//!
//! # async fn example() {
//! let store = MongoDocumentStore::connect(&MongoConfig::new("mongodb://localhost:27017", "lobster")).await;
//! let service = CatalogService::new(store);
//!
//! // Mount under /api
//! let router = handlers::router(service);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{
    Inquiry, InquiryCreated, LobsterProduct, ProductQuery, ProductType, SeedOutcome, SeedRequest,
    StockUnit,
};
pub use service::{CatalogService, DEFAULT_PRODUCT_LIMIT, INQUIRY_COLLECTION, PRODUCT_COLLECTION};
