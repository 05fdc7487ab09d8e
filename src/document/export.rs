//! Transport layer for the document host.
//!
//! [`DocumentExporter`] is the seam between the document service and the
//! network: one authenticated GET against the export endpoint, plus the
//! file-metadata lookup. [`HttpExporter`] is the production implementation;
//! tests substitute their own.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::{RedactedHeader, TokenProvider};
use crate::config::ExportConfig;
use crate::error::{CardstockError, Result};

/// Raw outcome of an export call: the HTTP status and the response body.
///
/// A non-success status is still a response, not an error. The caller
/// decides what to do with an error-page body.
#[derive(Debug, Clone)]
pub struct ExportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Metadata record for a remotely hosted file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub thumbnail_link: Option<String>,
    pub modified_time: Option<String>,
}

/// Transport interface to the document host.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    /// Fetch the rendered export of a document.
    ///
    /// Any HTTP response, success or error status, resolves to
    /// `Ok(ExportResponse)`. Only transport failures (network unreachable,
    /// DNS, timeout) are errors.
    async fn export_html(&self, id: &str) -> Result<ExportResponse>;

    /// Fetch the metadata record for a file. Unlike [`export_html`], a
    /// non-success HTTP status here is an error.
    ///
    /// [`export_html`]: DocumentExporter::export_html
    async fn file_metadata(&self, id: &str) -> Result<FileMetadata>;
}

/// reqwest-backed exporter hitting the configured endpoints with bearer auth.
pub struct HttpExporter {
    client: Client,
    tokens: Arc<dyn TokenProvider>,
    export_endpoint: Url,
    metadata_endpoint: Url,
    format: String,
}

impl HttpExporter {
    /// Create an exporter from endpoint configuration and a token provider.
    ///
    /// Configures the HTTP client with a 30s connect timeout and a 60s
    /// total timeout, so a fetch that would otherwise never return
    /// surfaces as a transport error instead.
    pub fn from_config(config: &ExportConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let export_endpoint = Url::parse(&config.endpoint)?;
        let metadata_endpoint = Url::parse(&config.metadata_endpoint)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            tokens,
            export_endpoint,
            metadata_endpoint,
            format: config.format.clone(),
        })
    }

    fn metadata_url(&self, id: &str) -> Result<Url> {
        let mut url = self.metadata_endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CardstockError::Config("metadata endpoint cannot be a base URL".to_string())
            })?
            .push(id);
        Ok(url)
    }

    fn auth_header(&self) -> Result<header::HeaderValue> {
        let token = self.tokens.bearer_token()?;
        RedactedHeader::bearer(&token).as_header_value()
    }
}

#[async_trait]
impl DocumentExporter for HttpExporter {
    async fn export_html(&self, id: &str) -> Result<ExportResponse> {
        let response = self
            .client
            .get(self.export_endpoint.clone())
            .query(&[("id", id), ("exportFormat", self.format.as_str())])
            .header(header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        Ok(ExportResponse { status, body })
    }

    async fn file_metadata(&self, id: &str) -> Result<FileMetadata> {
        let response = self
            .client
            .get(self.metadata_url(id)?)
            .header(header::AUTHORIZATION, self.auth_header()?)
            .send()
            .await?
            .error_for_status()?;

        let metadata = response.json::<FileMetadata>().await?;
        Ok(metadata)
    }
}
