use crate::error::{Result, ScanError};
use crate::extract;
use crate::result::CrawlResult;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fetches single pages. Never follows links found in a page.
pub struct Fetcher {
    client: Client,
    timeout_secs: u64,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pagesnap/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// GETs `url` and returns the body. Non-2xx statuses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        Url::parse(url).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", url, e)))?;

        debug!("Fetching {}", url);
        let start = Instant::now();
        let response = self.client.get(url).send().await?.error_for_status()?;
        let status = response.status();
        let body = response.text().await?;

        debug!(
            "Fetched {} ({}, {} bytes) in {:?}",
            url,
            status,
            body.len(),
            start.elapsed()
        );
        Ok(body)
    }

    /// Fetches `url` and extracts its title, links and visible text.
    pub async fn snapshot(&self, url: &str) -> Result<CrawlResult> {
        let body = self.fetch(url).await?;
        Ok(extract::snapshot(url, &body))
    }
}
