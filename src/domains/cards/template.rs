//! Adaptive Card template engine.
//!
//! A card template is a JSON document containing `${name}` placeholders for
//! the five news fields. Rendering is a literal textual substitution in a
//! fixed order followed by a JSON parse of the result, so the same template
//! and fields always produce the same document.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use super::error::CardError;

/// Content type of an Adaptive Card attachment.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// Recognized placeholder names, in substitution order.
pub const PLACEHOLDERS: [&str; 5] = [
    "title",
    "description",
    "source_link",
    "source_name",
    "source_date",
];

/// Dynamic values substituted into a card template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFields {
    pub title: String,
    pub description: String,
    pub source_link: String,
    pub source_name: String,
    pub source_date: String,
}

impl CardFields {
    /// Field values paired with their placeholder names, in substitution order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            (PLACEHOLDERS[0], self.title.as_str()),
            (PLACEHOLDERS[1], self.description.as_str()),
            (PLACEHOLDERS[2], self.source_link.as_str()),
            (PLACEHOLDERS[3], self.source_name.as_str()),
            (PLACEHOLDERS[4], self.source_date.as_str()),
        ]
    }
}

/// A card template held in memory.
///
/// The template text is never modified; every render works on a copy.
#[derive(Debug, Clone)]
pub struct CardTemplate {
    text: String,
    escape_values: bool,
}

impl CardTemplate {
    /// Create a template from raw text. Values are JSON-escaped by default.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            escape_values: true,
        }
    }

    /// Choose whether field values are JSON-escaped before splicing.
    ///
    /// With escaping disabled, a value containing a quote or backslash can
    /// break the surrounding document and rendering fails with a parse error.
    pub fn with_escaping(mut self, escape_values: bool) -> Self {
        self.escape_values = escape_values;
        self
    }

    /// Read a template from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CardError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded card template from {}", path.display());
                Ok(Self::new(text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("Card template not found: {}", path.display());
                Err(CardError::TemplateNotFound(path.to_path_buf()))
            }
            Err(e) => {
                error!("Failed to read card template {}: {}", path.display(), e);
                Err(CardError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    /// The raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every placeholder with its field value.
    pub fn substitute(&self, fields: &CardFields) -> Result<String, CardError> {
        for name in PLACEHOLDERS {
            if !self.text.contains(&placeholder(name)) {
                return Err(CardError::MissingPlaceholder(name.to_string()));
            }
        }

        let mut output = self.text.clone();
        for (name, value) in fields.entries() {
            let value = if self.escape_values {
                escape_json(value)?
            } else {
                value.to_string()
            };
            output = output.replace(&placeholder(name), &value);
        }

        Ok(output)
    }

    /// Substitute the fields and parse the result into a card document.
    pub fn render(&self, fields: &CardFields) -> Result<Value, CardError> {
        let substituted = self.substitute(fields)?;

        let document: Value = serde_json::from_str(&substituted).map_err(|e| {
            error!("Substituted card template is not valid JSON: {}", e);
            CardError::parse(e.to_string())
        })?;

        if !document.is_object() {
            return Err(CardError::parse(format!(
                "card document must be a JSON object, found {}",
                json_kind(&document)
            )));
        }

        Ok(document)
    }
}

/// Load the template at `path` and render it with `fields`.
pub fn render_card(
    path: impl AsRef<Path>,
    fields: &CardFields,
    escape_values: bool,
) -> Result<Value, CardError> {
    CardTemplate::load(path)?
        .with_escaping(escape_values)
        .render(fields)
}

fn placeholder(name: &str) -> String {
    format!("${{{}}}", name)
}

/// Escape a value for use inside a JSON string literal.
fn escape_json(value: &str) -> Result<String, CardError> {
    let quoted = serde_json::to_string(value).map_err(|e| CardError::parse(e.to_string()))?;
    Ok(quoted[1..quoted.len() - 1].to_string())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
