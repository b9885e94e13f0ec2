//! Send message tool definition.
//!
//! Sends a text or markdown message to a Webex user by email address.

use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use crate::domains::tools::handlers::{ToolHandler, ToolOutput, parse_params};
use crate::domains::tools::registry::ToolDescriptor;
use crate::domains::tools::schema::{Arguments, ParameterSchema};
use crate::domains::webex::Messenger;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the send message tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SendMessageParams {
    /// Recipient email address.
    #[schemars(description = "Email address of the Webex user to message")]
    pub recipient: String,

    /// Message body, plain text or markdown.
    #[schemars(description = "Message body (plain text or markdown)")]
    pub message_text: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Send message tool - posts a markdown message to a Webex user.
#[derive(Debug, Clone)]
pub struct SendMessageTool {
    messenger: Arc<Messenger>,
}

impl SendMessageTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "send_message";

    /// Human-readable title.
    pub const TITLE: &'static str = "Send Webex Message";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Sends a text or markdown message to a Webex user via their email address.";

    pub fn new(messenger: Arc<Messenger>) -> Self {
        Self { messenger }
    }

    pub fn schema() -> ParameterSchema {
        ParameterSchema::of::<SendMessageParams>()
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
    pub async fn execute(&self, params: &SendMessageParams) -> ToolOutput {
        match self
            .messenger
            .send_text(&params.recipient, &params.message_text)
            .await
        {
            Ok(receipt) => ToolOutput::success(json!({
                "status": "Message sent successfully.",
                "message_id": receipt.id,
            })),
            Err(e) => ToolOutput::failure(e.to_string()),
        }
    }
}

#[async_trait]
impl ToolHandler for SendMessageTool {
    async fn call(&self, arguments: &Arguments) -> ToolOutput {
        match parse_params::<SendMessageParams>(arguments) {
            Ok(params) => self.execute(&params).await,
            Err(e) => ToolOutput::failure(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::webex::messenger::tests::SpyTransport;
    use crate::domains::webex::{AccessToken, CredentialResolver};
    use serde_json::Value;

    fn tool(token: Option<&str>, spy: Arc<SpyTransport>) -> SendMessageTool {
        let messenger = Messenger::new(
            CredentialResolver::new(token.and_then(AccessToken::new)),
            spy,
        );
        SendMessageTool::new(Arc::new(messenger))
    }

    fn arguments() -> Arguments {
        let mut args = Arguments::new();
        args.insert("recipient".to_string(), Value::from("alice@example.com"));
        args.insert("message_text".to_string(), Value::from("Hello **team**"));
        args
    }

    #[tokio::test]
    async fn test_not_configured_skips_network() {
        let spy = Arc::new(SpyTransport::default());
        let output = tool(None, spy.clone()).call(&arguments()).await;

        assert_eq!(
            output,
            ToolOutput::failure("Webex API client not configured.")
        );
        assert_eq!(spy.calls(), 0);
    }

    #[tokio::test]
    async fn test_sends_markdown() {
        let spy = Arc::new(SpyTransport::default());
        let output = tool(Some("token"), spy.clone()).call(&arguments()).await;

        assert!(output.is_success());
        assert_eq!(
            output.payload().unwrap()["status"],
            "Message sent successfully."
        );
        assert_eq!(output.payload().unwrap()["message_id"], "msg-1");

        let sent = spy.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].1.markdown.as_deref(), Some("Hello **team**"));
        assert!(sent[0].1.attachments.is_empty());
    }

    #[tokio::test]
    async fn test_platform_rejection_is_failure() {
        let spy = Arc::new(SpyTransport::rejecting(
            401,
            "The request requires a valid access token.",
        ));
        let output = tool(Some("bad-token"), spy).call(&arguments()).await;

        assert_eq!(
            output.error(),
            Some("Webex API error: [401] The request requires a valid access token.")
        );
    }

    #[test]
    fn test_schema_from_params() {
        let schema = SendMessageTool::schema();
        let mut required = schema.required_names();
        required.sort();
        assert_eq!(required, vec!["message_text", "recipient"]);
        assert_eq!(
            schema.input_schema()["properties"]["recipient"]["description"],
            "Email address of the Webex user to message"
        );
    }
}
