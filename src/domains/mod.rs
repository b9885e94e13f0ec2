//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: The MCP tool registry, dispatcher and tool definitions
//! - **cards**: Adaptive Card template rendering
//! - **news**: News feed adapter
//! - **webex**: Webex messaging adapter and credential resolution

pub mod cards;
pub mod news;
pub mod tools;
pub mod webex;
