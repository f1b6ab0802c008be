//! Remote media download
//!
//! Post media can be imported from third-party URLs. Upstream CDNs sometimes
//! answer an expired link with an HTML or XML error page and a 200 status, so
//! callers must check the reported content type before storing anything.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use foncii_core::constants::POST_VIDEO_MAX_BYTES;
use foncii_core::MediaConfig;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("URL returned status code: {0}")]
    Status(u16),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Response body of {size} bytes exceeds the {max} byte limit")]
    TooLarge { size: usize, max: usize },
}

/// A downloaded resource.
#[derive(Debug, Clone)]
pub struct RemoteMedia {
    /// Lowercased content type without parameters.
    pub content_type: String,
    pub data: Bytes,
}

/// Downloads remote resources for ingestion.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RemoteMedia, FetchError>;
}

/// Normalize a `Content-Type` header value to its lowercased essence.
pub fn parse_content_type(header: Option<&str>) -> String {
    header
        .and_then(|h| h.split(';').next())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
}

fn ensure_within_limit(size: usize, max: usize) -> Result<(), FetchError> {
    if size > max {
        return Err(FetchError::TooLarge { size, max });
    }
    Ok(())
}

/// `reqwest`-backed fetcher
///
/// Bodies are read chunk by chunk and abandoned once they pass `max_bytes`,
/// which defaults to the largest ingestion ceiling (post videos).
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_bytes: POST_VIDEO_MAX_BYTES,
        })
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn from_config(config: &MediaConfig) -> Result<Self, FetchError> {
        Self::new(Duration::from_secs(config.remote_fetch_timeout_secs))
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RemoteMedia, FetchError> {
        let parsed_url =
            reqwest::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        if parsed_url.scheme() != "http" && parsed_url.scheme() != "https" {
            return Err(FetchError::InvalidUrl(format!(
                "Only HTTP and HTTPS URLs are allowed: {}",
                url
            )));
        }

        let start = std::time::Instant::now();

        let mut response = self
            .client
            .get(parsed_url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let content_type = parse_content_type(
            response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|h| h.to_str().ok()),
        );

        if let Some(declared) = response.content_length() {
            let declared = usize::try_from(declared).unwrap_or(usize::MAX);
            ensure_within_limit(declared, self.max_bytes)?;
        }

        let mut buffer = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?
        {
            ensure_within_limit(buffer.len() + chunk.len(), self.max_bytes)?;
            buffer.extend_from_slice(&chunk);
        }
        let data = buffer.freeze();

        tracing::debug!(
            url = %url,
            content_type = %content_type,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Downloaded remote media"
        );

        Ok(RemoteMedia { content_type, data })
    }
}
