//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod news;
pub mod webex;

pub use news::{FetchNewsParams, FetchNewsTool};
pub use webex::{SendCardParams, SendCardTool, SendMessageParams, SendMessageTool};
