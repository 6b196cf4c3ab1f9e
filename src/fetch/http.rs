//! HTTP chunk fetching.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use url::Url;

use crate::config::FetchConfig;
use crate::error::BoxError;
use crate::fetch::{AssetManifest, FetchError};
use crate::observability::metrics;

/// Fetches chunk bytes over HTTP.
///
/// Owns no retry logic; it reports each outcome once and lets the
/// resilient loader decide what a failure means.
#[derive(Debug, Clone)]
pub struct ChunkFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl ChunkFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let base_url = config
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Fetch the bytes at a chunk URL.
    pub async fn fetch_url(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        tracing::debug!(url = %url, "Fetching chunk");

        let response = match self.client.get(url.clone()).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Chunk fetch transport error");
                metrics::record_fetch("transport_error");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Chunk fetch returned non-success status");
            metrics::record_fetch("bad_status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        metrics::record_fetch("success");
        tracing::debug!(url = %url, bytes = bytes.len(), "Chunk fetched");
        Ok(bytes.to_vec())
    }

    /// Fetch a module's chunk as named by the manifest.
    ///
    /// Requires a configured base URL to resolve relative chunk paths.
    pub async fn fetch_chunk(
        &self,
        manifest: &AssetManifest,
        module: &str,
    ) -> Result<Vec<u8>, FetchError> {
        let base = self
            .base_url
            .as_ref()
            .ok_or_else(|| FetchError::MissingBaseUrl(module.to_string()))?;
        let url = manifest.chunk_url(base, module)?;
        self.fetch_url(&url).await
    }

    /// Adapt a chunk URL into a zero-argument factory for the loader.
    pub fn factory(
        &self,
        url: Url,
    ) -> impl Fn() -> Pin<Box<dyn Future<Output = Result<Vec<u8>, BoxError>> + Send>> {
        let fetcher = self.clone();
        move || {
            let fetcher = fetcher.clone();
            let url = url.clone();
            Box::pin(async move { fetcher.fetch_url(&url).await.map_err(BoxError::from) })
        }
    }
}
