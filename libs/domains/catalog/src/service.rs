use database::mongodb::DocumentStore;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Inquiry, LobsterProduct, SeedOutcome, from_document, to_document};
use crate::seed::sample_products;

pub const PRODUCT_COLLECTION: &str = "lobsterproduct";
pub const INQUIRY_COLLECTION: &str = "inquiry";
pub const DEFAULT_PRODUCT_LIMIT: i64 = 50;

/// Catalog and lead-capture operations over a [`DocumentStore`]
pub struct CatalogService<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Clone for CatalogService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DocumentStore> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Up to `limit` products in store order.
    ///
    /// Stored documents that no longer pass the product schema are skipped,
    /// so a single bad row never breaks the listing.
    #[instrument(skip(self))]
    pub async fn list_products(&self, limit: i64) -> CatalogResult<Vec<LobsterProduct>> {
        if limit < 1 {
            return Err(CatalogError::invalid_limit(limit));
        }

        let documents = self.store.get_documents(PRODUCT_COLLECTION, limit).await?;
        let fetched = documents.len();

        let products: Vec<LobsterProduct> = documents
            .into_iter()
            .filter_map(|document| match from_document(document) {
                Ok(product) => Some(product),
                Err(e) => {
                    debug!(error = %e, "Skipping stored product that fails validation");
                    None
                }
            })
            .collect();

        debug!(
            fetched,
            returned = products.len(),
            "Listed products"
        );
        Ok(products)
    }

    /// Store an already validated inquiry, returning its identifier
    #[instrument(skip(self, inquiry), fields(source = ?inquiry.source))]
    pub async fn create_inquiry(&self, inquiry: Inquiry) -> CatalogResult<String> {
        let document = to_document(&inquiry)?;
        let id = self.store.create_document(INQUIRY_COLLECTION, document).await?;

        info!(inquiry_id = %id, "Inquiry recorded");
        Ok(id)
    }

    /// Insert the sample catalogue.
    ///
    /// The existence query always runs, so an unreachable store fails here
    /// even when forced. Without `force` this is a no-op once any product
    /// exists. Individual insert failures are logged and skipped; `count`
    /// reports samples attempted.
    #[instrument(skip(self))]
    pub async fn seed_products(&self, force: bool) -> CatalogResult<SeedOutcome> {
        let existing = self.store.get_documents(PRODUCT_COLLECTION, 1).await?;
        if !existing.is_empty() && !force {
            info!("Products already exist, skipping seed");
            return Ok(SeedOutcome::already_seeded());
        }

        let samples = sample_products();
        let mut inserted = 0usize;

        for product in &samples {
            match self.insert_product(product).await {
                Ok(id) => {
                    inserted += 1;
                    debug!(product_id = %id, name = %product.name, "Sample product inserted");
                }
                Err(e) => {
                    warn!(name = %product.name, error = %e, "Failed to insert sample product");
                }
            }
        }

        info!(attempted = samples.len(), inserted, "Seeded sample products");
        Ok(SeedOutcome::seeded(samples.len()))
    }

    async fn insert_product(&self, product: &LobsterProduct) -> CatalogResult<String> {
        let document = to_document(product)?;
        Ok(self.store.create_document(PRODUCT_COLLECTION, document).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use database::{DatabaseError, DatabaseResult};
    use mockall::{mock, predicate::*};
    use mongodb::bson::{Document, doc, oid::ObjectId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    mock! {
        pub Store {}

        #[async_trait]
        impl DocumentStore for Store {
            fn database_name(&self) -> Option<String>;
            async fn create_document(&self, collection: &str, document: Document) -> DatabaseResult<String>;
            async fn get_documents(&self, collection: &str, limit: i64) -> DatabaseResult<Vec<Document>>;
            async fn list_collection_names(&self) -> DatabaseResult<Vec<String>>;
            async fn ping(&self) -> DatabaseResult<()>;
        }
    }

    fn product_doc(name: &str) -> Document {
        doc! {
            "_id": ObjectId::new(),
            "name": name,
            "type": "konsumsi",
            "price": 230000.0,
            "stock": 120_i64,
            "unit": "kg",
        }
    }

    fn new_id() -> DatabaseResult<String> {
        Ok(ObjectId::new().to_hex())
    }

    #[tokio::test]
    async fn test_list_products_skips_malformed_documents() {
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .with(eq(PRODUCT_COLLECTION), eq(10))
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    product_doc("A"),
                    doc! { "name": "Rusak", "type": "kepiting", "price": 1.0 },
                    product_doc("B"),
                    product_doc("C"),
                ])
            });

        let service = CatalogService::new(store);
        let products = service.list_products(10).await.unwrap();

        let names: Vec<_> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_list_products_rejects_non_positive_limit_without_store_call() {
        let store = MockStore::new();
        let service = CatalogService::new(store);

        let result = service.list_products(0).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_products_surfaces_storage_error() {
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .returning(|_, _| Err(DatabaseError::Unavailable("no handle".to_string())));

        let service = CatalogService::new(store);
        let result = service.list_products(DEFAULT_PRODUCT_LIMIT).await;
        assert!(matches!(
            result,
            Err(CatalogError::Storage(DatabaseError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_create_inquiry_stores_default_source() {
        let mut store = MockStore::new();
        store
            .expect_create_document()
            .with(
                eq(INQUIRY_COLLECTION),
                function(|document: &Document| {
                    document.get_str("source").ok() == Some("website")
                        && document.get_str("phone").ok() == Some("08123456789")
                }),
            )
            .times(1)
            .returning(|_, _| Ok("65f0c0ffee0000000000abcd".to_string()));

        let service = CatalogService::new(store);
        let inquiry = Inquiry {
            name: "Budi".to_string(),
            phone: "08123456789".to_string(),
            email: None,
            message: "Minta harga".to_string(),
            source: Some("website".to_string()),
        };

        let id = service.create_inquiry(inquiry).await.unwrap();
        assert_eq!(id, "65f0c0ffee0000000000abcd");
    }

    #[tokio::test]
    async fn test_seed_is_noop_when_products_exist() {
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .with(eq(PRODUCT_COLLECTION), eq(1))
            .times(1)
            .returning(|_, _| Ok(vec![product_doc("A")]));
        store.expect_create_document().times(0);

        let service = CatalogService::new(store);
        let outcome = service.seed_products(false).await.unwrap();
        assert_eq!(outcome, SeedOutcome::already_seeded());
    }

    #[tokio::test]
    async fn test_seed_twice_inserts_only_once() {
        let inserted = Arc::new(AtomicUsize::new(0));
        let mut store = MockStore::new();

        let seen = Arc::clone(&inserted);
        store.expect_get_documents().times(2).returning(move |_, _| {
            if seen.load(Ordering::SeqCst) == 0 {
                Ok(vec![])
            } else {
                Ok(vec![product_doc("A")])
            }
        });

        let counter = Arc::clone(&inserted);
        store
            .expect_create_document()
            .with(eq(PRODUCT_COLLECTION), always())
            .times(3)
            .returning(move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
                new_id()
            });

        let service = CatalogService::new(store);
        assert_eq!(service.seed_products(false).await.unwrap(), SeedOutcome::seeded(3));
        assert_eq!(
            service.seed_products(false).await.unwrap(),
            SeedOutcome::already_seeded()
        );
        assert_eq!(inserted.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_forced_seed_attempts_every_sample_despite_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .with(eq(PRODUCT_COLLECTION), eq(1))
            .times(1)
            .returning(|_, _| Ok(vec![product_doc("A")]));

        let counter = Arc::clone(&attempts);
        store
            .expect_create_document()
            .times(3)
            .returning(move |_, _| {
                if counter.fetch_add(1, Ordering::SeqCst) == 1 {
                    Err(DatabaseError::ConnectionFailed("write rejected".to_string()))
                } else {
                    new_id()
                }
            });

        let service = CatalogService::new(store);
        let outcome = service.seed_products(true).await.unwrap();
        assert_eq!(outcome, SeedOutcome::seeded(3));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_forced_seed_on_missing_store_is_an_error() {
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .times(1)
            .returning(|_, _| Err(DatabaseError::Unavailable("no handle".to_string())));
        store.expect_create_document().times(0);

        let service = CatalogService::new(store);
        assert!(matches!(
            service.seed_products(true).await,
            Err(CatalogError::Storage(DatabaseError::Unavailable(_)))
        ));
    }

    #[tokio::test]
    async fn test_seed_existence_check_failure_is_an_error() {
        let mut store = MockStore::new();
        store
            .expect_get_documents()
            .returning(|_, _| Err(DatabaseError::Unavailable("no handle".to_string())));
        store.expect_create_document().times(0);

        let service = CatalogService::new(store);
        assert!(matches!(
            service.seed_products(false).await,
            Err(CatalogError::Storage(_))
        ));
    }
}
