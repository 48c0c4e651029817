use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::HttpConfig;

/// Somewhere a listing page's current HTML can be read from.
///
/// Client-rendered pages change between snapshots, so the extractor polls
/// `snapshot` until the page looks ready.
#[async_trait]
pub trait PageSource: Send + Sync {
    fn url(&self) -> &str;

    /// Current serialized DOM.
    async fn snapshot(&self) -> Result<String>;
}

/// HTML that never changes: a saved page, a fixture, or a finished fetch.
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Read a saved page. `url` is the address the page was saved from.
    pub async fn from_file(url: impl Into<String>, path: &Path) -> Result<Self> {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!("Read {} bytes of HTML from {}", html.len(), path.display());
        Ok(Self::new(url, html))
    }

    /// Download a page once with a desktop browser user agent.
    pub async fn fetch(url: &str, config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        info!("Fetching {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            warn!("{} returned status: {}", url, response.status());
            anyhow::bail!("Failed to fetch {}: {}", url, response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", html.len());
        Ok(Self::new(url, html))
    }
}

#[async_trait]
impl PageSource for StaticPage {
    fn url(&self) -> &str {
        &self.url
    }

    async fn snapshot(&self) -> Result<String> {
        Ok(self.html.clone())
    }
}
