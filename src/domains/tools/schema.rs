//! Parameter schemas for tools.
//!
//! Each tool's parameters are a `#[derive(JsonSchema)]` struct. The schema
//! generated from it is both what MCP clients see as `inputSchema` and what
//! the dispatcher validates incoming arguments against before the handler
//! runs.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ToolError;

/// Tool arguments as received from the caller.
pub type Arguments = serde_json::Map<String, Value>;

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamKind {
    /// Parse a JSON Schema type name. `null` is not a parameter kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Whether `value` has this type.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// Input schema of a tool, generated from its parameter struct.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    schema: Arc<Arguments>,
}

impl ParameterSchema {
    /// Schema for the parameter struct `P`.
    pub fn of<P: JsonSchema + 'static>() -> Self {
        Self {
            schema: cached_schema_for_type::<P>(),
        }
    }

    /// The JSON Schema object advertised as MCP `inputSchema`.
    pub fn input_schema(&self) -> Arc<Arguments> {
        self.schema.clone()
    }

    fn properties(&self) -> Option<&Arguments> {
        self.schema.get("properties").and_then(Value::as_object)
    }

    /// Declared parameter names.
    pub fn param_names(&self) -> Vec<&str> {
        self.properties()
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of the required parameters.
    pub fn required_names(&self) -> Vec<&str> {
        self.schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Check arguments against the schema.
    ///
    /// Rejects unknown arguments, missing required arguments and values of
    /// the wrong type. A `null` value counts as absent.
    pub fn validate(&self, arguments: &Arguments) -> Result<(), ToolError> {
        let empty = Arguments::new();
        let properties = self.properties().unwrap_or(&empty);

        if let Some(unknown) = arguments.keys().find(|key| !properties.contains_key(*key)) {
            return Err(ToolError::invalid_arguments(format!(
                "unexpected argument '{}'",
                unknown
            )));
        }

        for name in self.required_names() {
            if arguments.get(name).is_none_or(Value::is_null) {
                return Err(ToolError::invalid_arguments(format!(
                    "missing required argument '{}'",
                    name
                )));
            }
        }

        for (name, value) in arguments {
            if value.is_null() {
                continue;
            }
            let Some(declared) = properties.get(name).and_then(|p| p.get("type")) else {
                continue;
            };
            if !type_matches(declared, value) {
                return Err(ToolError::invalid_arguments(format!(
                    "argument '{}' must be of type {}",
                    name,
                    type_label(declared)
                )));
            }
        }

        Ok(())
    }
}

/// Whether `value` satisfies a JSON Schema `type` (a name or a list of names).
fn type_matches(declared: &Value, value: &Value) -> bool {
    let matches_name = |name: &str| match name {
        "null" => value.is_null(),
        other => ParamKind::from_name(other).is_some_and(|kind| kind.matches(value)),
    };

    match declared {
        Value::String(name) => matches_name(name),
        Value::Array(names) => names.iter().filter_map(Value::as_str).any(matches_name),
        _ => true,
    }
}

fn type_label(declared: &Value) -> String {
    match declared {
        Value::String(name) => name.clone(),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" or "),
        other => other.to_string(),
    }
}
