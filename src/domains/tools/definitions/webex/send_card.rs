//! Send card tool definition.
//!
//! Renders a news bulletin into the Adaptive Card template and sends it to a
//! Webex user. The template is read from disk on every call.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::core::config::CardsConfig;
use crate::domains::cards::{CardFields, render_card};
use crate::domains::tools::handlers::{ToolHandler, ToolOutput, parse_params};
use crate::domains::tools::registry::ToolDescriptor;
use crate::domains::tools::schema::{Arguments, ParameterSchema};
use crate::domains::webex::Messenger;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the send card tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SendCardParams {
    /// Recipient email address.
    #[schemars(description = "Email address of the Webex user to message")]
    pub recipient: String,
    #[schemars(description = "News headline")]
    pub title: String,
    #[schemars(description = "Short summary of the article")]
    pub description: String,
    #[schemars(description = "URL of the original article")]
    pub source_link: String,
    #[schemars(description = "Name of the publication")]
    pub source_name: String,
    #[schemars(description = "Publication date")]
    pub source_date: String,
}

impl SendCardParams {
    fn fields(&self) -> CardFields {
        CardFields {
            title: self.title.clone(),
            description: self.description.clone(),
            source_link: self.source_link.clone(),
            source_name: self.source_name.clone(),
            source_date: self.source_date.clone(),
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Send card tool - sends a templated news card to a Webex user.
#[derive(Debug, Clone)]
pub struct SendCardTool {
    messenger: Arc<Messenger>,
    template_path: PathBuf,
    escape_values: bool,
}

impl SendCardTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "send_card";

    /// Human-readable title.
    pub const TITLE: &'static str = "Send Webex News Card";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Sends a pre-formatted news bulletin as an Adaptive Card to a Webex user.";

    pub fn new(messenger: Arc<Messenger>, config: &CardsConfig) -> Self {
        Self {
            messenger,
            template_path: config.template_path.clone(),
            escape_values: config.escape_values,
        }
    }

    pub fn schema() -> ParameterSchema {
        ParameterSchema::of::<SendCardParams>()
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
    ///
    /// Nothing is sent when the credential is missing or the card cannot be
    /// rendered.
    #[instrument(skip_all, fields(recipient = %params.recipient))]
    pub async fn execute(&self, params: &SendCardParams) -> ToolOutput {
        if let Err(e) = self.messenger.ensure_configured() {
            return ToolOutput::failure(e.to_string());
        }

        let card = match render_card(&self.template_path, &params.fields(), self.escape_values) {
            Ok(card) => card,
            Err(e) => {
                warn!("Card rendering failed: {}", e);
                return ToolOutput::failure(format!("Failed to create adaptive card: {}", e));
            }
        };

        let fallback = format!("News Update: {}", params.title);
        match self
            .messenger
            .send_card(&params.recipient, &fallback, card)
            .await
        {
            Ok(receipt) => {
                let status = format!("Adaptive card sent successfully to {}.", params.recipient);
                info!("{}", status);
                ToolOutput::success(json!({
                    "status": status,
                    "message_id": receipt.id,
                }))
            }
            Err(e) => ToolOutput::failure(e.to_string()),
        }
    }
}

#[async_trait]
impl ToolHandler for SendCardTool {
    async fn call(&self, arguments: &Arguments) -> ToolOutput {
        match parse_params::<SendCardParams>(arguments) {
            Ok(params) => self.execute(&params).await,
            Err(e) => ToolOutput::failure(e),
        }
    }
}
