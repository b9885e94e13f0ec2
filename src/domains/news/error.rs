//! Feed-specific error types.

use thiserror::Error;

/// Errors that can occur while fetching the news feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request timed out.
    #[error("request to {0} timed out")]
    Timeout(String),

    /// Connection, TLS or body-read failure.
    #[error("{0}")]
    Transport(String),

    /// The feed URL could not be built from configuration.
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if e.is_timeout() {
            Self::Timeout(url)
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                url,
            }
        } else {
            Self::Transport(e.to_string())
        }
    }
}
