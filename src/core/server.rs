//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tool registry.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered in `ToolRegistry::from_config`. The rmcp ToolRouter used by
//! the STDIO transport and the HTTP dispatch path are both derived from the
//! same registry, so a tool behaves identically on every transport.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    InvocationRequest, ToolError, ToolOutput, ToolRegistry, build_tool_router,
};

/// Instructions advertised to MCP clients.
const INSTRUCTIONS: &str = "Stateless server with Webex tools. Use fetch_news to get the last \
     7 days of Cisco news as raw RSS, send_message to message a Webex user by email, and \
     send_card to send a news bulletin as an Adaptive Card.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It holds no
/// per-session or per-call state: cloning it is cheap and every tool call is
/// independent.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let config = Arc::new(config);

        if !config.cards.template_path.exists() {
            warn!(
                "Card template {} not found; send_card will fail until it exists",
                config.cards.template_path.display()
            );
        }

        let registry = Arc::new(ToolRegistry::from_config(config.clone())?);
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already populated registry.
    pub fn with_registry(config: Arc<Config>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config,
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the tool registry.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// Describe all available tools (for HTTP transport).
    pub fn describe_tools(&self) -> Vec<Value> {
        self.registry
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "title": t.title,
                    "description": t.description,
                    "inputSchema": t.input_schema.as_ref()
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[instrument(skip(self, arguments))]
    pub async fn invoke_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<ToolOutput, ToolError> {
        let request = InvocationRequest::from_value(name, arguments)?;
        let output = self.registry.invoke(&request).await?;
        debug!("Tool {} finished (success: {})", name, output.is_success());
        Ok(output)
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    #[test]
    fn test_server_identity() {
        let server = test_server();
        assert_eq!(server.name(), "webex-news-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(server.registry().len(), 3);
    }

    #[test]
    fn test_get_info_enables_tools_only() {
        let info = test_server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
    }

    #[test]
    fn test_describe_tools() {
        let tools = test_server().describe_tools();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0]["name"], "fetch_news");
        assert_eq!(tools[1]["title"], "Send Webex Message");
        assert_eq!(tools[2]["inputSchema"]["type"], "object");
    }

    #[tokio::test]
    async fn test_invoke_tool_unknown() {
        let err = test_server()
            .invoke_tool("get_weather", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invoke_send_message_without_credential() {
        let output = test_server()
            .invoke_tool(
                "send_message",
                json!({ "recipient": "alice@example.com", "message_text": "hi" }),
            )
            .await
            .unwrap();
        assert_eq!(
            output,
            ToolOutput::failure("Webex API client not configured.")
        );
    }
}
