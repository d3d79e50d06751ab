//! Generic document-store adapter over named collections

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::{Bson, DateTime, Document, doc},
    options::FindOptions,
};
use tracing::{instrument, warn};

use super::{MongoConfig, check_health_detailed, connect_from_config};
use crate::common::{DatabaseError, DatabaseResult};

const UNAVAILABLE_HINT: &str = "check DATABASE_URL and DATABASE_NAME environment variables";

/// Schemaless persistence over named collections.
///
/// Implementations never enforce document shape; callers validate before
/// writing and re-validate after reading.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the connected database, or `None` when no handle exists
    fn database_name(&self) -> Option<String>;

    /// Whether a database handle exists (says nothing about reachability)
    fn is_available(&self) -> bool {
        self.database_name().is_some()
    }

    /// Insert one document and return the store-assigned identifier as text
    async fn create_document(&self, collection: &str, document: Document) -> DatabaseResult<String>;

    /// Fetch up to `limit` documents in the store's natural order
    async fn get_documents(&self, collection: &str, limit: i64) -> DatabaseResult<Vec<Document>>;

    /// List collection names in the database
    async fn list_collection_names(&self) -> DatabaseResult<Vec<String>>;

    /// Round-trip a lightweight command to confirm the server answers
    async fn ping(&self) -> DatabaseResult<()>;
}

/// MongoDB-backed [`DocumentStore`].
///
/// Holds the single process-wide database handle. When built with
/// [`MongoDocumentStore::unavailable`] (or when connecting fails) every
/// operation returns [`DatabaseError::Unavailable`].
#[derive(Clone, Debug)]
pub struct MongoDocumentStore {
    db: Option<Database>,
}

impl MongoDocumentStore {
    /// Wrap an already connected database handle
    pub fn new(db: Database) -> Self {
        Self { db: Some(db) }
    }

    /// A store with no database handle
    pub fn unavailable() -> Self {
        Self { db: None }
    }

    /// Connect from config, falling back to a degraded store on any failure
    pub async fn connect(config: &MongoConfig) -> Self {
        match connect_from_config(config).await {
            Ok((_client, db)) => Self::new(db),
            Err(e) => {
                warn!(error = %e, "MongoDB unavailable, starting in degraded mode");
                Self::unavailable()
            }
        }
    }

    fn database(&self) -> DatabaseResult<&Database> {
        self.db
            .as_ref()
            .ok_or_else(|| DatabaseError::Unavailable(UNAVAILABLE_HINT.to_string()))
    }
}

/// Add `created_at`/`updated_at` to a document about to be inserted
pub fn stamp_timestamps(mut document: Document, now: DateTime) -> Document {
    document.insert("created_at", now);
    document.insert("updated_at", now);
    document
}

/// Render an inserted `_id` as text (ObjectIds as 24-char hex)
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_limit(limit: i64) -> DatabaseResult<()> {
    if limit < 1 {
        return Err(DatabaseError::InvalidArgument(format!(
            "limit must be a positive integer, got {}",
            limit
        )));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn database_name(&self) -> Option<String> {
        self.db.as_ref().map(|db| db.name().to_string())
    }

    #[instrument(skip(self, document))]
    async fn create_document(&self, collection: &str, document: Document) -> DatabaseResult<String> {
        let db = self.database()?;
        let document = stamp_timestamps(document, DateTime::now());

        let result = db
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        let id = id_to_string(&result.inserted_id);
        tracing::debug!(document_id = %id, "Document inserted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn get_documents(&self, collection: &str, limit: i64) -> DatabaseResult<Vec<Document>> {
        check_limit(limit)?;
        let db = self.database()?;

        let options = FindOptions::builder().limit(limit).build();
        let cursor = db
            .collection::<Document>(collection)
            .find(doc! {})
            .with_options(options)
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents)
    }

    #[instrument(skip(self))]
    async fn list_collection_names(&self) -> DatabaseResult<Vec<String>> {
        let db = self.database()?;
        Ok(db.list_collection_names().await?)
    }

    async fn ping(&self) -> DatabaseResult<()> {
        let status = check_health_detailed(self.database()?).await;
        tracing::debug!(
            healthy = status.healthy,
            response_time_ms = status.response_time_ms,
            "MongoDB ping"
        );
        if status.healthy {
            Ok(())
        } else {
            Err(DatabaseError::ConnectionFailed(
                status.message.unwrap_or_default(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[tokio::test]
    async fn test_unavailable_store_fails_every_operation() {
        let store = MongoDocumentStore::unavailable();

        assert_eq!(store.database_name(), None);
        assert!(!store.is_available());
        assert!(matches!(
            store.create_document("inquiry", doc! { "name": "Budi" }).await,
            Err(DatabaseError::Unavailable(_))
        ));
        assert!(matches!(
            store.get_documents("lobsterproduct", 10).await,
            Err(DatabaseError::Unavailable(_))
        ));
        assert!(matches!(
            store.list_collection_names().await,
            Err(DatabaseError::Unavailable(_))
        ));
        assert!(matches!(store.ping().await, Err(DatabaseError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_get_documents_rejects_non_positive_limit() {
        let store = MongoDocumentStore::unavailable();
        assert!(matches!(
            store.get_documents("lobsterproduct", 0).await,
            Err(DatabaseError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.get_documents("lobsterproduct", -3).await,
            Err(DatabaseError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_connect_without_settings_degrades() {
        let store = MongoDocumentStore::connect(&MongoConfig::unconfigured()).await;
        assert_eq!(store.database_name(), None);
    }

    #[test]
    fn test_stamp_timestamps_adds_both_fields() {
        let now = DateTime::now();
        let stamped = stamp_timestamps(doc! { "name": "Budi" }, now);
        assert_eq!(stamped.get_datetime("created_at").unwrap(), &now);
        assert_eq!(stamped.get_datetime("updated_at").unwrap(), &now);
        assert_eq!(stamped.get_str("name").unwrap(), "Budi");
    }

    #[test]
    fn test_id_to_string_renders_object_id_as_hex() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(&Bson::String("abc".to_string())), "abc");
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_create_then_get_documents() {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let store = MongoDocumentStore::connect(&MongoConfig::new(url, "lobster_test")).await;

        let id = store
            .create_document("inquiry", doc! { "name": "Budi" })
            .await
            .unwrap();
        assert_eq!(id.len(), 24);

        let docs = store.get_documents("inquiry", 1).await.unwrap();
        assert_eq!(docs.len(), 1);
    }
}
