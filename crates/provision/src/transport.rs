//! Download transport for tool archives.
//!
//! The trait seam exists so tests can substitute a counting stub and
//! observe that warm cache hits perform zero network requests.

use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::{Error, Result};

/// Fetches a remote archive to a local file.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `uri` into `dest`, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DownloadFailed`] on network errors, non-2xx
    /// responses and truncated transfers. No retry at this layer.
    async fn fetch(&self, uri: &str, dest: &Path) -> Result<()>;
}

/// HTTP transport backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Panics
    ///
    /// `reqwest::Client::builder().build()` only fails with invalid TLS
    /// configuration, which cannot happen with default settings; a panic
    /// here indicates a fundamental environment issue.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        // reqwest is built without a bundled TLS provider; ring backs it.
        let _ = rustls::crypto::ring::default_provider().install_default();
        Self {
            client: reqwest::Client::builder()
                .user_agent("toolchest")
                .build()
                .expect("Failed to create HTTP client - TLS backend initialization failed"),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, uri: &str, dest: &Path) -> Result<()> {
        debug!(%uri, ?dest, "Downloading archive");

        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| Error::download_failed(uri, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download_failed(
                uri,
                format!("HTTP {}", response.status()),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download_failed(uri, e.to_string()))?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(dest, &bytes).await?;

        debug!(%uri, ?dest, size = bytes.len(), "Downloaded archive");
        Ok(())
    }
}
