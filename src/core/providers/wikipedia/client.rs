//! reqwest-backed client for the Wikipedia REST summary endpoint

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use super::types::PageSummary;
use crate::config::SummaryApiConfig;
use crate::core::providers::{ProviderError, SummaryApi};

pub const PROVIDER_NAME: &str = "wikipedia";

/// Wikipedia summary client
#[derive(Debug, Clone)]
pub struct WikipediaClient {
    client: Client,
    endpoint: Url,
    follow_redirects: bool,
}

impl WikipediaClient {
    /// Create a client from configuration
    pub fn new(config: &SummaryApiConfig) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            ProviderError::configuration(
                PROVIDER_NAME,
                format!("Invalid endpoint '{}': {}", config.endpoint, e),
            )
        })?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            ProviderError::configuration(
                PROVIDER_NAME,
                format!("Failed to build HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            endpoint,
            follow_redirects: config.follow_redirects,
        })
    }

    /// Request URL for `title`: the title becomes one percent-encoded path
    /// segment, followed by `?redirect=true` when redirects are followed.
    /// Fails for endpoints such as `mailto:` that cannot carry a path.
    pub fn summary_url(&self, title: &str) -> Result<Url, ProviderError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::invalid_request(
                    PROVIDER_NAME,
                    format!("Endpoint {} cannot carry a title segment", self.endpoint),
                )
            })?
            .pop_if_empty()
            .push(title);
        if self.follow_redirects {
            url.query_pairs_mut().append_pair("redirect", "true");
        }
        Ok(url)
    }
}

#[async_trait]
impl SummaryApi for WikipediaClient {
    async fn page_summary(&self, title: &str) -> Result<PageSummary, ProviderError> {
        let url = self.summary_url(title)?;
        debug!(%url, "Requesting page summary");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::network(PROVIDER_NAME, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(title, status = status.as_u16(), "Summary request returned non-success status");
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProviderError::network(PROVIDER_NAME, e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| ProviderError::response_parsing(PROVIDER_NAME, e.to_string()))
    }
}
