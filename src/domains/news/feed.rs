//! News feed adapter.
//!
//! Issues a single GET against the configured feed URL with a bounded
//! timeout. No retries are attempted and the body is not parsed.

use std::time::Duration;

use tracing::{debug, error, instrument};

use super::error::FeedError;
use crate::core::config::NewsConfig;

/// Build the feed URL from configuration.
///
/// An explicit `feed_url` wins; otherwise the URL is assembled from the
/// search query, the recency window and the locale parameters.
pub fn build_feed_url(config: &NewsConfig) -> Result<String, FeedError> {
    if let Some(url) = &config.feed_url {
        return Ok(url.clone());
    }

    let query = format!("{} when:{}d", config.query, config.window_days);
    let encoded = serde_urlencoded::to_string([
        ("q", query.as_str()),
        ("hl", config.language.as_str()),
        ("gl", config.region.as_str()),
        ("ceid", config.edition.as_str()),
    ])
    .map_err(|e| FeedError::InvalidUrl(e.to_string()))?;

    Ok(format!("{}?{}", config.base_url, encoded))
}

/// HTTP client for the news feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new() -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Client(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch the feed at `url` and return its body as text.
    ///
    /// Any non-2xx status is reported the same way as a network fault.
    #[instrument(skip(self))]
    pub async fn fetch_feed(&self, url: &str, timeout: Duration) -> Result<String, FeedError> {
        let result: Result<String, reqwest::Error> = async {
            let response = self
                .http
                .get(url)
                .timeout(timeout)
                .send()
                .await?
                .error_for_status()?;
            response.text().await
        }
        .await;

        match result {
            Ok(body) => {
                debug!("Fetched news feed ({} bytes)", body.len());
                Ok(body)
            }
            Err(e) => {
                let err = FeedError::from(e);
                error!("Failed to fetch news feed: {}", err);
                Err(err)
            }
        }
    }
}
