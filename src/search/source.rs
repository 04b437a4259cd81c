//! Where search lookups go
//!
//! - `TmdbSearch`: straight to the metadata client
//! - `EndpointSearch`: through a running Vertica server's `/api/search`

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::api::tmdb::shows_from_value;
use crate::api::TmdbClient;
use crate::models::ShowSummary;

#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Look up shows for an already-trimmed, non-blank query
    async fn search(&self, query: &str) -> Result<Vec<ShowSummary>>;
}

/// Search through the TMDB client (shares its cache)
pub struct TmdbSearch {
    client: Arc<TmdbClient>,
}

impl TmdbSearch {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchSource for TmdbSearch {
    async fn search(&self, query: &str) -> Result<Vec<ShowSummary>> {
        Ok(self.client.search_shows(query).await?)
    }
}

/// Search through the passthrough endpoint
pub struct EndpointSearch {
    base_url: String,
    client: reqwest::Client,
}

impl EndpointSearch {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    pub fn url_for(&self, query: &str) -> String {
        format!("{}/api/search?q={}", self.base_url, urlencoding::encode(query))
    }
}

#[async_trait]
impl SearchSource for EndpointSearch {
    async fn search(&self, query: &str) -> Result<Vec<ShowSummary>> {
        let url = self.url_for(query);
        debug!(url = %url, "search endpoint request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("search endpoint unreachable")?;

        if !response.status().is_success() {
            bail!("search endpoint returned {}", response.status());
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("search endpoint returned invalid JSON")?;
        Ok(shows_from_value(body)?)
    }
}
