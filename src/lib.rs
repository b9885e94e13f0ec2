//! Webex News MCP Server Library
//!
//! This crate provides a stateless Model Context Protocol (MCP) server that
//! exposes three tools: `fetch_news` (recent Cisco news as raw RSS),
//! `send_message` (a Webex text/markdown message) and `send_card` (a news
//! bulletin rendered into an Adaptive Card).
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Registry, dispatcher and the three tool definitions
//!   - **cards**: Template engine for Adaptive Cards
//!   - **news**: Feed adapter
//!   - **webex**: Messaging adapter and credential resolver
//!
//! Every tool call returns the same `{success, payload, error}` envelope.
//! External faults become failure envelopes; they never escape a handler.
//!
//! # Example
//!
//! ```rust,no_run
//! use webex_news_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{InvocationRequest, ToolError, ToolOutput, ToolRegistry};
