//! Webex messages API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::credentials::AccessToken;
use super::error::WebexError;
use crate::core::config::WebexConfig;
use crate::domains::cards::ADAPTIVE_CARD_CONTENT_TYPE;

/// Body of a `POST /messages` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    /// Recipient email address.
    pub to_person_email: String,

    /// Plain-text body (used as the fallback for cards).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Markdown body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl OutgoingMessage {
    /// A text or markdown message.
    pub fn markdown(recipient: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            to_person_email: recipient.into(),
            text: None,
            markdown: Some(markdown.into()),
            attachments: Vec::new(),
        }
    }

    /// A message carrying a single Adaptive Card attachment.
    pub fn card(recipient: impl Into<String>, text_fallback: impl Into<String>, card: Value) -> Self {
        Self {
            to_person_email: recipient.into(),
            text: Some(text_fallback.into()),
            markdown: None,
            attachments: vec![Attachment::adaptive_card(card)],
        }
    }
}

/// A message attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: Value,
}

impl Attachment {
    /// Wrap a rendered card document.
    pub fn adaptive_card(content: Value) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content,
        }
    }
}

/// The subset of the created message returned by Webex that we keep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageReceipt {
    #[serde(default)]
    pub id: Option<String>,
}

/// Outbound "create message" operation.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send one message with the given bearer token.
    async fn create_message(
        &self,
        token: &AccessToken,
        message: &OutgoingMessage,
    ) -> Result<MessageReceipt, WebexError>;
}

/// reqwest-backed Webex API client.
#[derive(Debug, Clone)]
pub struct WebexClient {
    http: reqwest::Client,
    base_url: String,
}

impl WebexClient {
    /// Create a client for the configured API base URL.
    pub fn new(config: &WebexConfig) -> Result<Self, WebexError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WebexError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url)
    }
}

#[async_trait]
impl MessageTransport for WebexClient {
    async fn create_message(
        &self,
        token: &AccessToken,
        message: &OutgoingMessage,
    ) -> Result<MessageReceipt, WebexError> {
        let response = self
            .http
            .post(self.messages_url())
            .bearer_auth(token.expose())
            .json(message)
            .send()
            .await
            .map_err(|e| WebexError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WebexError::api(status.as_u16(), api_error_detail(&body)));
        }

        match response.json::<MessageReceipt>().await {
            Ok(receipt) => {
                debug!("Webex accepted message {:?}", receipt.id);
                Ok(receipt)
            }
            Err(e) => {
                // The message was accepted; only the echo could not be decoded.
                warn!("Could not decode Webex response body: {}", e);
                Ok(MessageReceipt::default())
            }
        }
    }
}

/// Extract a human-readable detail from a Webex error body.
fn api_error_detail(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .and_then(|m| m.as_str())
            .map(|m| m.to_string())
    });

    match from_json {
        Some(message) => message,
        None if body.trim().is_empty() => "no response body".to_string(),
        None => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_message_shape() {
        let message = OutgoingMessage::markdown("alice@example.com", "**hi**");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "toPersonEmail": "alice@example.com", "markdown": "**hi**" })
        );
    }

    #[test]
    fn test_card_message_shape() {
        let message = OutgoingMessage::card(
            "alice@example.com",
            "News Update: Cisco acquires X",
            json!({ "type": "AdaptiveCard" }),
        );
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({
                "toPersonEmail": "alice@example.com",
                "text": "News Update: Cisco acquires X",
                "attachments": [{
                    "contentType": "application/vnd.microsoft.card.adaptive",
                    "content": { "type": "AdaptiveCard" }
                }]
            })
        );
    }

    #[test]
    fn test_api_error_detail() {
        assert_eq!(
            api_error_detail(r#"{"message":"The request requires a valid access token set in the Authorization request header.","trackingId":"X"}"#),
            "The request requires a valid access token set in the Authorization request header."
        );
        assert_eq!(api_error_detail("Too Many Requests"), "Too Many Requests");
        assert_eq!(api_error_detail("  "), "no response body");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = WebexConfig {
            base_url: "http://localhost:1234/v1/".to_string(),
            ..WebexConfig::default()
        };
        let client = WebexClient::new(&config).unwrap();
        assert_eq!(client.messages_url(), "http://localhost:1234/v1/messages");
    }
}
