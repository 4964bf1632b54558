use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::FeedConfig;
use crate::error::{AppError, Result};

pub struct FeedClient {
    client: Client,
    config: FeedConfig,
}

impl FeedClient {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("arxiv-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Request URL for the configured query, optionally overriding the result limit.
    pub fn query_url(&self, max_results: Option<u32>) -> Result<Url> {
        let max_results = max_results.unwrap_or(self.config.max_results);
        let url = Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("search_query", format!("cat:{}", self.config.category)),
                ("start", self.config.start.to_string()),
                ("max_results", max_results.to_string()),
                ("sortBy", self.config.sort_by.as_str().to_string()),
                ("sortOrder", self.config.sort_order.as_str().to_string()),
            ],
        )?;
        Ok(url)
    }

    /// Perform one GET against the feed endpoint and return the body text.
    pub async fn fetch_raw(&self, max_results: Option<u32>) -> Result<String> {
        let url = self.query_url(max_results)?;
        tracing::debug!(%url, "Fetching feed");

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::FeedStatus(response.status()));
        }

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), "Fetched feed");
        Ok(body)
    }
}
