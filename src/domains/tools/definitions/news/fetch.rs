//! Fetch news tool definition.
//!
//! Returns the raw Cisco news RSS feed for the last seven days.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::NewsConfig;
use crate::domains::news::{FeedClient, FeedError, build_feed_url};
use crate::domains::tools::handlers::{ToolHandler, ToolOutput};
use crate::domains::tools::registry::ToolDescriptor;
use crate::domains::tools::schema::{Arguments, ParameterSchema};

/// The fetch news tool takes no arguments.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FetchNewsParams {}

/// Fetch news tool - fetches the recency-windowed news feed.
#[derive(Debug, Clone)]
pub struct FetchNewsTool {
    feed: FeedClient,
    url: String,
    timeout: Duration,
}

impl FetchNewsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "fetch_news";

    /// Human-readable title.
    pub const TITLE: &'static str = "Get Cisco News (Last 7 Days)";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Fetches recent news articles related to Cisco from the last 7 days via a Google News RSS feed. Returns the raw RSS XML.";

    /// Create the tool for the configured feed.
    pub fn new(feed: FeedClient, config: &NewsConfig) -> Result<Self, FeedError> {
        Ok(Self {
            feed,
            url: build_feed_url(config)?,
            timeout: config.timeout(),
        })
    }

    /// The feed URL this tool fetches.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn schema() -> ParameterSchema {
        ParameterSchema::of::<FetchNewsParams>()
    }

    /// Build the registry descriptor for this tool.
    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor::new(
            Self::NAME,
            Self::TITLE,
            Self::DESCRIPTION,
            Self::schema(),
            Arc::new(self),
        )
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(&self) -> ToolOutput {
        match self.feed.fetch_feed(&self.url, self.timeout).await {
            Ok(body) => {
                info!("Successfully fetched Cisco news RSS feed.");
                ToolOutput::success(body)
            }
            Err(e) => ToolOutput::failure(format!(
                "An error occurred while fetching the news feed: {}",
                e
            )),
        }
    }
}

#[async_trait]
impl ToolHandler for FetchNewsTool {
    async fn call(&self, _arguments: &Arguments) -> ToolOutput {
        self.execute().await
    }
}
