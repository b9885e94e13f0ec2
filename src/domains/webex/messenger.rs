//! Messaging adapter used by the Webex tools.
//!
//! Every operation checks the credential before any network I/O and turns
//! transport failures into [`WebexError`] values; nothing escapes as a panic.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument};

use super::client::{MessageReceipt, MessageTransport, OutgoingMessage};
use super::credentials::CredentialResolver;
use super::error::WebexError;

/// Sends plain and card messages to Webex users.
#[derive(Clone)]
pub struct Messenger {
    credentials: CredentialResolver,
    transport: Arc<dyn MessageTransport>,
}

impl Messenger {
    /// Create a messenger from a credential resolver and a transport.
    pub fn new(credentials: CredentialResolver, transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Fail fast when no access token is configured.
    pub fn ensure_configured(&self) -> Result<(), WebexError> {
        self.credentials.resolve().map(|_| ())
    }

    /// Send a text or markdown message.
    #[instrument(skip(self, text))]
    pub async fn send_text(&self, recipient: &str, text: &str) -> Result<MessageReceipt, WebexError> {
        let receipt = self
            .deliver(OutgoingMessage::markdown(recipient, text))
            .await?;
        info!("Message successfully sent to {}.", recipient);
        Ok(receipt)
    }

    /// Send a message with one Adaptive Card attachment.
    #[instrument(skip(self, text_fallback, card))]
    pub async fn send_card(
        &self,
        recipient: &str,
        text_fallback: &str,
        card: Value,
    ) -> Result<MessageReceipt, WebexError> {
        let receipt = self
            .deliver(OutgoingMessage::card(recipient, text_fallback, card))
            .await?;
        info!("Adaptive card successfully sent to {}.", recipient);
        Ok(receipt)
    }

    async fn deliver(&self, message: OutgoingMessage) -> Result<MessageReceipt, WebexError> {
        let token = self.credentials.resolve()?;
        self.transport
            .create_message(token, &message)
            .await
            .inspect_err(|e| error!("Webex send to {} failed: {}", message.to_person_email, e))
    }
}

impl std::fmt::Debug for Messenger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Messenger")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domains::webex::credentials::AccessToken;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every message and answers with a canned result.
    #[derive(Default)]
    pub(crate) struct SpyTransport {
        pub(crate) sent: Mutex<Vec<(String, OutgoingMessage)>>,
        pub(crate) reject_with: Option<(u16, String)>,
    }

    impl SpyTransport {
        pub(crate) fn rejecting(status: u16, detail: &str) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                reject_with: Some((status, detail.to_string())),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MessageTransport for SpyTransport {
        async fn create_message(
            &self,
            token: &AccessToken,
            message: &OutgoingMessage,
        ) -> Result<MessageReceipt, WebexError> {
            self.sent
                .lock()
                .unwrap()
                .push((token.expose().to_string(), message.clone()));
            match &self.reject_with {
                Some((status, detail)) => Err(WebexError::api(*status, detail.clone())),
                None => Ok(MessageReceipt {
                    id: Some("msg-1".to_string()),
                }),
            }
        }
    }

    fn messenger(token: Option<&str>, spy: Arc<SpyTransport>) -> Messenger {
        Messenger::new(
            CredentialResolver::new(token.and_then(AccessToken::new)),
            spy,
        )
    }

    #[tokio::test]
    async fn test_send_text_without_credential_skips_network() {
        let spy = Arc::new(SpyTransport::default());
        let messenger = messenger(None, spy.clone());

        let err = messenger
            .send_text("alice@example.com", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, WebexError::NotConfigured));
        assert_eq!(err.to_string(), "Webex API client not configured.");
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_send_card_without_credential_skips_network() {
        let spy = Arc::new(SpyTransport::default());
        let messenger = messenger(None, spy.clone());

        let result = messenger
            .send_card("alice@example.com", "News Update", json!({}))
            .await;
        assert!(result.is_err());
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_send_text_uses_token_and_markdown() {
        let spy = Arc::new(SpyTransport::default());
        let messenger = messenger(Some("token-1"), spy.clone());

        let receipt = messenger
            .send_text("alice@example.com", "**hello**")
            .await
            .unwrap();
        assert_eq!(receipt.id.as_deref(), Some("msg-1"));

        let sent = spy.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "token-1");
        assert_eq!(
            sent[0].1,
            OutgoingMessage::markdown("alice@example.com", "**hello**")
        );
    }

    #[tokio::test]
    async fn test_platform_rejection_is_mapped() {
        let spy = Arc::new(SpyTransport::rejecting(429, "Too Many Requests"));
        let messenger = messenger(Some("token-1"), spy.clone());

        let err = messenger
            .send_text("alice@example.com", "hello")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Webex API error: [429] Too Many Requests");
        assert_eq!(spy.calls(), 1);
    }

    #[test]
    fn test_ensure_configured() {
        let spy = Arc::new(SpyTransport::default());
        assert!(messenger(None, spy.clone()).ensure_configured().is_err());
        assert!(messenger(Some("t"), spy).ensure_configured().is_ok());
    }
}
