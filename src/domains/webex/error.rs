//! Webex-specific error types.

use thiserror::Error;

/// Errors that can occur while talking to the Webex API.
///
/// The `Display` text of each variant is the diagnostic returned to callers.
#[derive(Debug, Error)]
pub enum WebexError {
    /// No access token is available.
    #[error("Webex API client not configured.")]
    NotConfigured,

    /// The platform rejected the request (authentication, recipient, rate limit...).
    #[error("Webex API error: [{status}] {detail}")]
    Api { status: u16, detail: String },

    /// Any other fault while sending (timeout, connection, TLS).
    #[error("An unexpected error occurred: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build Webex HTTP client: {0}")]
    Client(String),
}

impl WebexError {
    /// Create a new API rejection error.
    pub fn api(status: u16, detail: impl Into<String>) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
