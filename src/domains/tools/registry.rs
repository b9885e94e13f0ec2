//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - Tool descriptors (name, title, description, parameter schema, handler)
//! - A registry that rejects duplicate names
//! - Stateless dispatch: look up, validate, call the handler, return its
//!   envelope untouched

use std::sync::Arc;

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::definitions::{FetchNewsTool, SendCardTool, SendMessageTool};
use super::error::ToolError;
use super::handlers::{ToolHandler, ToolOutput};
use super::schema::{Arguments, ParameterSchema};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::domains::news::FeedClient;
use crate::domains::webex::{CredentialResolver, Messenger, WebexClient};

// ============================================================================
// Tool Descriptor
// ============================================================================

/// Everything the registry knows about one tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: String,
    title: String,
    description: String,
    schema: ParameterSchema,
    handler: Arc<dyn ToolHandler>,
}

impl ToolDescriptor {
    /// Create a new descriptor.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        schema: ParameterSchema,
        handler: Arc<dyn ToolHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: description.into(),
            schema,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: self.schema.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some(self.title.clone()),
        }
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Invocation Request
// ============================================================================

/// One tool call: a tool name and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Arguments,
}

impl InvocationRequest {
    /// Create a request from an argument map.
    pub fn new(tool_name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }

    /// Create a request from a raw JSON value. `null` means no arguments.
    pub fn from_value(tool_name: impl Into<String>, arguments: Value) -> Result<Self, ToolError> {
        match arguments {
            Value::Null => Ok(Self::new(tool_name, Arguments::new())),
            Value::Object(map) => Ok(Self::new(tool_name, map)),
            _ => Err(ToolError::invalid_arguments("arguments must be a JSON object")),
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// The registry is filled once at startup and is read-only afterwards, so it
/// can be shared across concurrent invocations without locking.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the news and Webex tools wired to their adapters.
    pub fn from_config(config: Arc<Config>) -> Result<Self> {
        let feed = FeedClient::new()?;
        let messenger = Arc::new(Messenger::new(
            CredentialResolver::from_config(&config.credentials),
            Arc::new(WebexClient::new(&config.webex)?),
        ));

        let mut registry = Self::new();
        registry.register(FetchNewsTool::new(feed, &config.news)?.descriptor())?;
        registry.register(SendMessageTool::new(messenger.clone()).descriptor())?;
        registry.register(SendCardTool::new(messenger, &config.cards).descriptor())?;
        Ok(registry)
    }

    /// Register a tool. Names must be unique.
    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.get(descriptor.name()).is_some() {
            warn!("Tool already registered: {}", descriptor.name());
            return Err(ToolError::duplicate_name(descriptor.name()));
        }
        info!("Registered tool: {}", descriptor.name());
        self.tools.push(descriptor);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// All descriptors, in registration order.
    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a tool call to the appropriate handler.
    ///
    /// Unknown tools and invalid arguments are rejected before the handler
    /// runs. Otherwise the handler's envelope is returned as is.
    pub async fn invoke(&self, request: &InvocationRequest) -> Result<ToolOutput, ToolError> {
        let Some(descriptor) = self.get(&request.tool_name) else {
            warn!("Unknown tool requested: {}", request.tool_name);
            return Err(ToolError::not_found(&request.tool_name));
        };

        descriptor.schema().validate(&request.arguments).inspect_err(|e| {
            warn!("Rejected call to {}: {}", request.tool_name, e);
        })?;

        debug!("Dispatching tool call: {}", request.tool_name);
        Ok(descriptor.handler.call(&request.arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    #[allow(dead_code)]
    struct EchoParams {
        #[schemars(description = "Text to echo")]
        text: String,
    }

    /// Records how often it was called and echoes its arguments.
    #[derive(Default)]
    struct RecordingHandler {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ToolHandler for RecordingHandler {
        async fn call(&self, arguments: &Arguments) -> ToolOutput {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ToolOutput::success(Value::Object(arguments.clone()))
        }
    }

    fn echo_descriptor(name: &str, handler: Arc<RecordingHandler>) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            "Echo",
            "Echo the arguments back",
            ParameterSchema::of::<EchoParams>(),
            handler,
        )
    }

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::from_config(test_config()).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec!["fetch_news", "send_message", "send_card"]
        );
    }

    #[test]
    fn test_registry_tool_metadata() {
        let registry = ToolRegistry::from_config(test_config()).unwrap();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 3);

        let send_card = tools.iter().find(|t| t.name == "send_card").unwrap();
        assert_eq!(send_card.title.as_deref(), Some("Send Webex News Card"));
        let mut required: Vec<_> = send_card.input_schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        required.sort();
        assert_eq!(
            required,
            vec![
                "description",
                "recipient",
                "source_date",
                "source_link",
                "source_name",
                "title"
            ]
        );
        assert_eq!(send_card.input_schema["additionalProperties"], false);
    }

    #[test]
    fn test_register_duplicate_name() {
        let handler = Arc::new(RecordingHandler::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo", handler.clone()))
            .unwrap();

        let err = registry
            .register(echo_descriptor("echo", handler))
            .unwrap_err();
        assert_eq!(err, ToolError::DuplicateName("echo".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_returns_handler_output() {
        let handler = Arc::new(RecordingHandler::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo", handler.clone()))
            .unwrap();

        let request = InvocationRequest::from_value("echo", json!({ "text": "hi" })).unwrap();
        let output = registry.invoke(&request).await.unwrap();
        assert_eq!(output, ToolOutput::success(json!({ "text": "hi" })));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool_never_calls_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo", handler.clone()))
            .unwrap();

        let request = InvocationRequest::from_value("missing", json!({ "text": "hi" })).unwrap();
        let err = registry.invoke(&request).await.unwrap_err();
        assert_eq!(err, ToolError::NotFound("missing".to_string()));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invoke_invalid_arguments_never_calls_handler() {
        let handler = Arc::new(RecordingHandler::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo", handler.clone()))
            .unwrap();

        let missing = InvocationRequest::from_value("echo", Value::Null).unwrap();
        let err = registry.invoke(&missing).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let wrong_type = InvocationRequest::from_value("echo", json!({ "text": 1 })).unwrap();
        let err = registry.invoke(&wrong_type).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        assert_eq!(handler.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invocations_are_independent() {
        let handler = Arc::new(RecordingHandler::default());
        let mut registry = ToolRegistry::new();
        registry
            .register(echo_descriptor("echo", handler.clone()))
            .unwrap();
        let registry = Arc::new(registry);

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                tokio::spawn(async move {
                    let request = InvocationRequest::from_value(
                        "echo",
                        json!({ "text": format!("call-{}", i) }),
                    )
                    .unwrap();
                    (i, registry.invoke(&request).await.unwrap())
                })
            })
            .collect();

        for task in tasks {
            let (i, output) = task.await.unwrap();
            assert_eq!(
                output,
                ToolOutput::success(json!({ "text": format!("call-{}", i) }))
            );
        }
        assert_eq!(handler.calls.load(Ordering::SeqCst), 8);
    }

    #[test]
    fn test_arguments_must_be_object() {
        let err = InvocationRequest::from_value("echo", json!([1, 2])).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }
}
