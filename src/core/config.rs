//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. The resulting value is passed explicitly to every component;
//! nothing reads the environment after startup.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::domains::webex::ACCESS_TOKEN_ENV;

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Webex API endpoint configuration.
    pub webex: WebexConfig,

    /// News feed configuration.
    pub news: NewsConfig,

    /// Adaptive Card template configuration.
    pub cards: CardsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Webex bearer token, read from `WEBEX_ACCESS_TOKEN`.
    pub webex_access_token: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "webex_access_token",
                &self.webex_access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Webex API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebexConfig {
    /// API base URL, without the `/messages` suffix.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// News feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Full feed URL. When set, the query parts below are ignored.
    pub feed_url: Option<String>,

    /// Search endpoint the query parameters are appended to.
    pub base_url: String,

    /// Search query, e.g. `intitle:CISCO`.
    pub query: String,

    /// Recency window in days.
    pub window_days: u32,

    /// Interface language (`hl`).
    pub language: String,

    /// Region (`gl`).
    pub region: String,

    /// Edition (`ceid`).
    pub edition: String,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Card template configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsConfig {
    /// Path of the Adaptive Card template, read on every render.
    pub template_path: PathBuf,

    /// JSON-escape field values before splicing them into the template.
    pub escape_values: bool,
}

impl Default for WebexConfig {
    fn default() -> Self {
        Self {
            base_url: "https://webexapis.com/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            base_url: "https://news.google.com/rss/search".to_string(),
            query: "intitle:CISCO".to_string(),
            window_days: 7,
            language: "fr".to_string(),
            region: "FR".to_string(),
            edition: "FR:fr".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl NewsConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from("adaptive_card.json"),
            escape_values: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "webex-news-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            webex: WebexConfig::default(),
            news: NewsConfig::default(),
            cards: CardsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); the Webex token is read from `WEBEX_ACCESS_TOKEN`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        // Webex credential
        match std::env::var(ACCESS_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => {
                config.credentials.webex_access_token = Some(token);
                info!("Webex access token loaded from environment");
            }
            _ => warn!(
                "{} not set - Webex tools will report a configuration error",
                ACCESS_TOKEN_ENV
            ),
        }

        if let Ok(base_url) = std::env::var("MCP_WEBEX_BASE_URL") {
            config.webex.base_url = base_url;
        }
        if let Some(secs) = env_parse_nonzero("MCP_WEBEX_TIMEOUT_SECS") {
            config.webex.timeout_secs = secs;
        }

        // News feed
        if let Ok(url) = std::env::var("MCP_NEWS_FEED_URL") {
            config.news.feed_url = Some(url);
        }
        if let Ok(query) = std::env::var("MCP_NEWS_QUERY") {
            config.news.query = query;
        }
        if let Some(days) = env_parse("MCP_NEWS_WINDOW_DAYS") {
            config.news.window_days = days;
        }
        if let Some(ms) = env_parse_nonzero("MCP_NEWS_TIMEOUT_MS") {
            config.news.timeout_ms = ms;
        }

        // Card template
        if let Ok(path) = std::env::var("MCP_CARD_TEMPLATE_PATH") {
            config.cards.template_path = PathBuf::from(path);
        }
        if let Ok(escape) = std::env::var("MCP_CARD_ESCAPE_VALUES") {
            config.cards.escape_values = escape.to_lowercase() != "false" && escape != "0";
            if !config.cards.escape_values {
                warn!("Card value escaping disabled: quotes in fields will break the card");
            }
        }

        config
    }
}

/// Parse an environment variable, ignoring unset or malformed values.
fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

/// Like [`env_parse`], but a zero value is ignored too.
fn env_parse_nonzero<T: std::str::FromStr + Default + PartialEq>(key: &str) -> Option<T> {
    let value = env_parse::<T>(key)?;
    if value == T::default() {
        warn!("Ignoring zero value for {}", key);
        return None;
    }
    Some(value)
}
