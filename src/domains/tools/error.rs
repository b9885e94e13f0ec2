//! Tool-specific error types.
//!
//! These are request-level errors raised by the dispatcher before a handler
//! runs. Failures inside a handler are reported through [`ToolOutput`]
//! instead.
//!
//! [`ToolOutput`]: super::ToolOutput

use thiserror::Error;

/// Errors that can occur while registering or dispatching tools.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// A tool with the same name is already registered.
    #[error("Tool already registered: {0}")]
    DuplicateName(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "duplicate name" error.
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
