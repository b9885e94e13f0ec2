//! Tool handler contract and result envelope.
//!
//! Every tool returns a [`ToolOutput`], which serializes to the same
//! `{success, payload, error}` shape regardless of the tool, so callers need
//! a single decoding path.

use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::schema::Arguments;

/// Result envelope returned by every tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "Envelope", try_from = "Envelope")]
pub enum ToolOutput {
    /// The tool succeeded with the given payload (a mapping or a string).
    Success(Value),

    /// The tool failed with a non-empty, human-readable description.
    Failure(String),
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(payload: impl Into<Value>) -> Self {
        Self::Success(payload.into())
    }

    /// Create a failed tool output.
    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        if error.trim().is_empty() {
            Self::Failure("Unknown error".to_string())
        } else {
            Self::Failure(error)
        }
    }

    /// Whether the tool succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The success payload, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure(_) => None,
        }
    }

    /// The failure description, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// The envelope as a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Success(payload) => json!({ "success": true, "payload": payload }),
            Self::Failure(error) => json!({ "success": false, "payload": null, "error": error }),
        }
    }

    /// Convert to an MCP tool result carrying the envelope.
    pub fn to_call_tool_result(&self) -> CallToolResult {
        let envelope = self.to_json();
        let content = vec![Content::text(envelope.to_string())];
        let mut result = if self.is_success() {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        };
        result.structured_content = Some(envelope);
        result
    }
}

/// Wire representation of [`ToolOutput`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<ToolOutput> for Envelope {
    fn from(output: ToolOutput) -> Self {
        match output {
            ToolOutput::Success(payload) => Self {
                success: true,
                payload,
                error: None,
            },
            ToolOutput::Failure(error) => Self {
                success: false,
                payload: Value::Null,
                error: Some(error),
            },
        }
    }
}

impl TryFrom<Envelope> for ToolOutput {
    type Error = String;

    fn try_from(envelope: Envelope) -> Result<Self, Self::Error> {
        match (envelope.success, envelope.error) {
            (true, None) => Ok(Self::Success(envelope.payload)),
            (true, Some(_)) => Err("successful envelope must not carry an error".to_string()),
            (false, Some(error)) if !error.is_empty() => Ok(Self::Failure(error)),
            (false, _) => Err("failed envelope must carry a non-empty error".to_string()),
        }
    }
}

/// Trait implemented by every tool handler.
///
/// Handlers receive arguments that were already validated against the
/// tool's parameter schema, and must report every failure through the
/// returned [`ToolOutput`].
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given arguments.
    async fn call(&self, arguments: &Arguments) -> ToolOutput;
}

/// Deserialize validated arguments into a typed parameter struct.
pub fn parse_params<P: DeserializeOwned>(arguments: &Arguments) -> Result<P, String> {
    serde_json::from_value(Value::Object(arguments.clone()))
        .map_err(|e| format!("Invalid arguments: {}", e))
}
