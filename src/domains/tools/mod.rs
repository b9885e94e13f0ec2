//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named, independently invocable units with a declared parameter
//! schema; every call is stateless and returns the same result envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `schema.rs` - Input schemas generated from params structs, and validation
//! - `handlers.rs` - `ToolHandler` trait and the `ToolOutput` envelope
//! - `registry.rs` - Tool descriptors, registration and dispatch
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `error.rs` - Request-level error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a `JsonSchema` params struct and a handler
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it in `ToolRegistry::from_config`
//!
//! The router and the HTTP transport pick it up from the registry.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schema;

pub use error::ToolError;
pub use handlers::{ToolHandler, ToolOutput, parse_params};
pub use registry::{InvocationRequest, ToolDescriptor, ToolRegistry};
pub use router::build_tool_router;
pub use schema::{Arguments, ParamKind, ParameterSchema};
