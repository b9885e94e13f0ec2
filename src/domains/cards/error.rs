//! Card-specific error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or rendering a card template.
#[derive(Debug, Error)]
pub enum CardError {
    /// The template file does not exist.
    #[error("Card template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The template file exists but could not be read.
    #[error("Failed to read card template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template does not contain one of the recognized placeholders.
    #[error("Card template is missing placeholder '${{{0}}}'")]
    MissingPlaceholder(String),

    /// The substituted template is not a valid card document.
    #[error("Failed to parse card template: {0}")]
    Parse(String),
}

impl CardError {
    /// Create a new "parse" error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Whether this error means the template source could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound(_))
    }

    /// Whether this error means the substitution result was not a valid document.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}
