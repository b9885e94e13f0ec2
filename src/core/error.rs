//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies. Tool calls never surface these to
//! clients directly: handlers convert failures into result envelopes, and
//! only startup and transport code propagate them.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the Webex domain.
    #[error("Webex error: {0}")]
    Webex(#[from] crate::domains::webex::WebexError),

    /// Error originating from the news domain.
    #[error("Feed error: {0}")]
    Feed(#[from] crate::domains::news::FeedError),

    /// Error raised by a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}
