//! `GET /test`: database diagnostics.
//!
//! Four signals are gathered independently: process liveness, whether a
//! database handle exists, whether the connection string is configured, and
//! whether listing collection names succeeds. A failing check only changes
//! its own fields; the endpoint itself always answers 200.

use axum::{Json, Router, extract::State, routing::get};
use database::mongodb::DocumentStore;
use serde::Serialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::state::AppState;

/// At most this many collection names are reported
pub const MAX_COLLECTIONS: usize = 10;
/// Listing errors are cut to this many characters
pub const ERROR_PREVIEW_CHARS: usize = 50;

const BACKEND_RUNNING: &str = "✅ Running";
const DATABASE_NOT_AVAILABLE: &str = "❌ Not Available";
const DATABASE_NOT_INITIALIZED: &str = "⚠️  Available but not initialized";
const DATABASE_AVAILABLE: &str = "✅ Available";
const DATABASE_WORKING: &str = "✅ Connected & Working";
const URL_SET: &str = "✅ Set";
const URL_NOT_SET: &str = "❌ Not Set";
const CONNECTED: &str = "Connected";
const NOT_CONNECTED: &str = "Not Connected";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DiagnosticsReport {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for DiagnosticsReport {
    fn default() -> Self {
        Self {
            backend: BACKEND_RUNNING.to_string(),
            database: DATABASE_NOT_AVAILABLE.to_string(),
            database_url: None,
            database_name: None,
            connection_status: NOT_CONNECTED.to_string(),
            collections: Vec::new(),
        }
    }
}

/// Check `store` and build the report
#[instrument(skip(store))]
pub async fn diagnose<S: DocumentStore + ?Sized>(
    store: &S,
    database_url_set: bool,
) -> DiagnosticsReport {
    let url_status = if database_url_set { URL_SET } else { URL_NOT_SET };
    let mut report = DiagnosticsReport {
        database_url: Some(url_status.to_string()),
        ..DiagnosticsReport::default()
    };

    let Some(database_name) = store.database_name() else {
        report.database = DATABASE_NOT_INITIALIZED.to_string();
        return report;
    };

    report.database = DATABASE_AVAILABLE.to_string();
    report.database_name = Some(database_name);
    report.connection_status = CONNECTED.to_string();

    match store.list_collection_names().await {
        Ok(mut names) => {
            names.truncate(MAX_COLLECTIONS);
            report.collections = names;
            report.database = DATABASE_WORKING.to_string();
        }
        Err(e) => {
            debug!(error = %e, "Collection listing failed");
            report.database = format!(
                "⚠️  Connected but Error: {}",
                error_preview(&e.to_string())
            );
        }
    }

    report
}

fn error_preview(message: &str) -> String {
    message.chars().take(ERROR_PREVIEW_CHARS).collect()
}

/// Database diagnostics
#[utoipa::path(
    get,
    path = "/test",
    tag = "Status",
    responses((status = 200, description = "Diagnostic report", body = DiagnosticsReport))
)]
pub async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let report = diagnose(&state.store, state.config.mongodb.has_url()).await;
    Json(report)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(test_database))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use database::{DatabaseError, DatabaseResult};
    use database::mongodb::bson::Document;
    use http_body_util::BodyExt;
    use mockall::mock;
    use serde_json::Value;
    use tower::ServiceExt;

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

    fn connected_store() -> MockStore {
        let mut store = MockStore::new();
        store
            .expect_database_name()
            .returning(|| Some("lobster".to_string()));
        store
    }

    #[tokio::test]
    async fn test_endpoint_without_store_is_ok() {
        let response = router(AppState::degraded())
            .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["backend"], "✅ Running");
        assert_eq!(body["database"], "⚠️  Available but not initialized");
        assert_eq!(body["database_url"], "❌ Not Set");
        assert_eq!(body["database_name"], Value::Null);
        assert_eq!(body["connection_status"], "Not Connected");
        assert_eq!(body["collections"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_missing_handle_still_reports_configured_url() {
        let mut store = MockStore::new();
        store.expect_database_name().returning(|| None);
        store.expect_list_collection_names().times(0);

        let report = diagnose(&store, true).await;
        assert_eq!(report.database, "⚠️  Available but not initialized");
        assert_eq!(report.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(report.database_name, None);
        assert_eq!(report.connection_status, "Not Connected");
    }

    #[tokio::test]
    async fn test_failed_listing_leaves_connection_status() {
        let mut store = connected_store();
        store
            .expect_list_collection_names()
            .returning(|| Err(DatabaseError::ConnectionFailed("boom".to_string())));

        let report = diagnose(&store, true).await;
        assert_eq!(report.database, "⚠️  Connected but Error: Connection failed: boom");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(report.database_name.as_deref(), Some("lobster"));
    }

    #[tokio::test]
    async fn test_working_store_caps_collections() {
        let mut store = connected_store();
        store.expect_list_collection_names().times(1).returning(|| {
            Ok((1..=12).map(|i| format!("kolam{}", i)).collect())
        });

        let report = diagnose(&store, true).await;
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.database_url.as_deref(), Some("✅ Set"));
        assert_eq!(report.database_name.as_deref(), Some("lobster"));
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.collections.len(), MAX_COLLECTIONS);
        assert_eq!(report.collections[0], "kolam1");
    }

    #[tokio::test]
    async fn test_failed_listing_error_is_truncated() {
        let mut store = connected_store();
        store.expect_list_collection_names().returning(|| {
            Err(DatabaseError::ConnectionFailed("x".repeat(200)))
        });

        let report = diagnose(&store, false).await;
        // "Connection failed: " is 19 chars, leaving 31 of the payload
        let expected = format!("⚠️  Connected but Error: Connection failed: {}", "x".repeat(31));
        assert_eq!(report.database, expected);
        assert_eq!(report.database_url.as_deref(), Some("❌ Not Set"));
        assert_eq!(report.connection_status, "Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_error_preview_counts_chars_not_bytes() {
        let preview = error_preview(&"é".repeat(80));
        assert_eq!(preview.chars().count(), ERROR_PREVIEW_CHARS);
    }
}
