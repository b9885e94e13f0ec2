//! Webex messaging tools.
//!
//! - `send_message`: plain text or markdown message to a person
//! - `send_card`: news bulletin rendered as an Adaptive Card

pub mod send_card;
pub mod send_message;

pub use send_card::{SendCardParams, SendCardTool};
pub use send_message::{SendMessageParams, SendMessageTool};
