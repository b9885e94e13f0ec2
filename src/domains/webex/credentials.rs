//! Webex access token handling.

use tracing::error;

use super::error::WebexError;
use crate::core::config::CredentialsConfig;

/// Environment variable holding the Webex bearer token.
pub const ACCESS_TOKEN_ENV: &str = "WEBEX_ACCESS_TOKEN";

/// An opaque Webex access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token. Blank values are treated as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// The raw token, for building the Authorization header only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

/// Resolves the access token for a send attempt.
#[derive(Debug, Clone, Default)]
pub struct CredentialResolver {
    token: Option<AccessToken>,
}

impl CredentialResolver {
    /// Create a resolver around an optional token.
    pub fn new(token: Option<AccessToken>) -> Self {
        Self { token }
    }

    /// Create a resolver from the credentials section of the configuration.
    pub fn from_config(credentials: &CredentialsConfig) -> Self {
        Self::new(
            credentials
                .webex_access_token
                .as_deref()
                .and_then(AccessToken::new),
        )
    }

    /// Return the token, or a configuration error when it is missing.
    pub fn resolve(&self) -> Result<&AccessToken, WebexError> {
        self.token.as_ref().ok_or_else(|| {
            error!(
                "{} environment variable not set. Webex tools will fail.",
                ACCESS_TOKEN_ENV
            );
            WebexError::NotConfigured
        })
    }
}
