//! HTTP content provider.
//!
//! Fetches the full record set as a JSON array from a remote endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::domain::RemixRecord;

use super::ContentProvider;

/// Provider backed by a JSON endpoint returning `[RemixRecord, ...]`
pub struct HttpProvider {
    /// Endpoint URL
    url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl HttpProvider {
    /// Create a provider with the given request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl ContentProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_all(&self) -> Result<Vec<RemixRecord>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch records from {}", self.url))?
            .error_for_status()
            .with_context(|| format!("Record endpoint returned an error: {}", self.url))?;

        let records: Vec<RemixRecord> = response
            .json()
            .await
            .context("Failed to parse records response")?;

        debug!(count = records.len(), url = %self.url, "Fetched records");
        Ok(records)
    }
}
