//! Document fetch and cache service.
//!
//! This module retrieves the rendered-HTML representation of remotely
//! hosted documents, exactly once per identifier per service lifetime, and
//! exposes thumbnail and metadata lookups alongside.
//!
//! # Error-body policy
//!
//! HTTP exceptions are muted: a non-2xx response from the export endpoint
//! is returned (and cached) as content, not raised. Downstream code may
//! rely on inspecting error-page bodies, so this policy is part of the
//! service contract. Transport failures still propagate as errors and are
//! never cached.

pub mod cache;
pub mod export;

use std::sync::Arc;

use tracing::{info, warn};

use crate::auth::StaticTokenProvider;
use crate::config::Config;
use crate::error::{CardstockError, Result};

pub use cache::{DocumentCache, EvictionPolicy};
pub use export::{DocumentExporter, ExportResponse, FileMetadata, HttpExporter};

/// Service for reading remotely hosted documents as HTML.
///
/// Owns the transport and an explicit [`DocumentCache`]; composition roots
/// construct one service and share it wherever document content is needed.
pub struct DocumentService {
    exporter: Box<dyn DocumentExporter>,
    cache: DocumentCache,
}

impl DocumentService {
    /// Create a service with a default (never-evicting) cache.
    pub fn new(exporter: Box<dyn DocumentExporter>) -> Self {
        Self::with_cache(exporter, DocumentCache::default())
    }

    /// Create a service with an explicitly configured cache.
    pub fn with_cache(exporter: Box<dyn DocumentExporter>, cache: DocumentCache) -> Self {
        Self { exporter, cache }
    }

    /// Wire up an HTTP-backed service from configuration.
    ///
    /// The bearer token comes from the environment or the config file; a
    /// missing token is a configuration error since the export endpoint
    /// rejects unauthenticated requests.
    pub fn from_config(config: &Config) -> Result<Self> {
        let token = config
            .bearer_token()
            .ok_or_else(|| CardstockError::Auth("no bearer token configured".to_string()))?;

        let exporter = HttpExporter::from_config(
            &config.export,
            Arc::new(StaticTokenProvider::new(token)),
        )?;

        Ok(Self::with_cache(
            Box::new(exporter),
            DocumentCache::new(config.cache.eviction),
        ))
    }

    /// Get a document as HTML, checking the cache before fetching.
    ///
    /// The returned string may itself contain unresolved merge
    /// placeholders. A non-success HTTP status is returned as the
    /// error-page body rather than an error, and is cached like any other
    /// body. Transport failures propagate and leave the cache untouched,
    /// so the next call retries the fetch.
    pub async fn document_as_html(&self, id: &str) -> Result<String> {
        if id.is_empty() {
            return Err(CardstockError::EmptyDocumentId);
        }

        if let Some(body) = self.cache.get(id) {
            return Ok(body);
        }

        let response = self.exporter.export_html(id).await?;
        if !response.status.is_success() {
            warn!(
                document_id = %id,
                status = %response.status,
                "export returned non-success status; caching error body"
            );
        }
        info!(document_id = %id, "loading document");

        self.cache.insert(id, response.body.clone());
        Ok(response.body)
    }

    /// Get the thumbnail URL for a document. Not cached.
    pub async fn thumbnail(&self, id: &str) -> Result<String> {
        let metadata = self.exporter.file_metadata(id).await?;
        metadata
            .thumbnail_link
            .ok_or_else(|| CardstockError::Metadata(format!("file '{id}' has no thumbnail link")))
    }

    /// Get the full metadata record for a document. Not cached.
    pub async fn metadata(&self, id: &str) -> Result<FileMetadata> {
        self.exporter.file_metadata(id).await
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    use super::*;

    /// Exporter double that serves a configurable body and counts fetches.
    struct FakeExporter {
        status: StatusCode,
        body: Mutex<String>,
        metadata: Mutex<FileMetadata>,
        export_calls: AtomicUsize,
        metadata_calls: AtomicUsize,
        fail_next: AtomicBool,
    }

    impl FakeExporter {
        fn new(status: StatusCode, body: &str) -> Self {
            Self {
                status,
                body: Mutex::new(body.to_string()),
                metadata: Mutex::new(FileMetadata {
                    id: "doc-1".to_string(),
                    name: Some("Doc".to_string()),
                    mime_type: None,
                    thumbnail_link: Some("https://example.com/thumb.png".to_string()),
                    modified_time: None,
                }),
                export_calls: AtomicUsize::new(0),
                metadata_calls: AtomicUsize::new(0),
                fail_next: AtomicBool::new(false),
            }
        }

        fn set_body(&self, body: &str) {
            *self.body.lock() = body.to_string();
        }

        fn export_calls(&self) -> usize {
            self.export_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentExporter for Arc<FakeExporter> {
        async fn export_html(&self, _id: &str) -> Result<ExportResponse> {
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(CardstockError::Other("connection reset".to_string()));
            }
            self.export_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExportResponse {
                status: self.status,
                body: self.body.lock().clone(),
            })
        }

        async fn file_metadata(&self, _id: &str) -> Result<FileMetadata> {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.metadata.lock().clone())
        }
    }

    fn service_with(exporter: Arc<FakeExporter>) -> DocumentService {
        DocumentService::new(Box::new(exporter))
    }

    #[tokio::test]
    async fn test_cache_idempotence() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, "<p>v1</p>"));
        let service = service_with(exporter.clone());

        let first = service.document_as_html("doc-1").await.unwrap();
        assert_eq!(first, "<p>v1</p>");

        // Remote content changes between calls; the cached value still wins.
        exporter.set_body("<p>v2</p>");
        let second = service.document_as_html("doc-1").await.unwrap();

        assert_eq!(second, first);
        assert_eq!(exporter.export_calls(), 1);
    }

    #[tokio::test]
    async fn test_distinct_ids_fetch_separately() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, "<p>body</p>"));
        let service = service_with(exporter.clone());

        service.document_as_html("doc-1").await.unwrap();
        service.document_as_html("doc-2").await.unwrap();

        assert_eq!(exporter.export_calls(), 2);
        assert_eq!(service.cache().len(), 2);
    }

    #[tokio::test]
    async fn test_error_body_is_returned_and_cached() {
        let exporter = Arc::new(FakeExporter::new(
            StatusCode::NOT_FOUND,
            "<html>not found</html>",
        ));
        let service = service_with(exporter.clone());

        let body = service.document_as_html("doc-gone").await.unwrap();
        assert_eq!(body, "<html>not found</html>");

        let again = service.document_as_html("doc-gone").await.unwrap();
        assert_eq!(again, "<html>not found</html>");
        assert_eq!(exporter.export_calls(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_and_is_not_cached() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, "<p>body</p>"));
        exporter.fail_next.store(true, Ordering::SeqCst);
        let service = service_with(exporter.clone());

        assert!(service.document_as_html("doc-1").await.is_err());
        assert!(!service.cache().contains("doc-1"));

        // The next call retries the fetch and succeeds.
        let body = service.document_as_html("doc-1").await.unwrap();
        assert_eq!(body, "<p>body</p>");
        assert_eq!(exporter.export_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected_without_fetching() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, "<p>body</p>"));
        let service = service_with(exporter.clone());

        assert!(matches!(
            service.document_as_html("").await,
            Err(CardstockError::EmptyDocumentId)
        ));
        assert_eq!(exporter.export_calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_body_is_cached() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, ""));
        let service = service_with(exporter.clone());

        assert_eq!(service.document_as_html("doc-1").await.unwrap(), "");
        assert_eq!(service.document_as_html("doc-1").await.unwrap(), "");
        assert_eq!(exporter.export_calls(), 1);
    }

    #[tokio::test]
    async fn test_thumbnail_returns_link() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, ""));
        let service = service_with(exporter.clone());

        let link = service.thumbnail("doc-1").await.unwrap();
        assert_eq!(link, "https://example.com/thumb.png");
    }

    #[tokio::test]
    async fn test_thumbnail_missing_link_is_metadata_error() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, ""));
        exporter.metadata.lock().thumbnail_link = None;
        let service = service_with(exporter.clone());

        assert!(matches!(
            service.thumbnail("doc-1").await,
            Err(CardstockError::Metadata(_))
        ));
    }

    #[tokio::test]
    async fn test_metadata_lookups_are_not_cached() {
        let exporter = Arc::new(FakeExporter::new(StatusCode::OK, ""));
        let service = service_with(exporter.clone());

        service.metadata("doc-1").await.unwrap();
        service.metadata("doc-1").await.unwrap();
        service.thumbnail("doc-1").await.unwrap();

        assert_eq!(exporter.metadata_calls.load(Ordering::SeqCst), 3);
    }
}
