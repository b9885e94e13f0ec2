//! Webex domain module.
//!
//! Wraps the Webex messages API behind a narrow interface used by the
//! messaging tools.
//!
//! ## Architecture
//!
//! - `credentials.rs` - Access token resolution (redacted in logs)
//! - `client.rs` - `MessageTransport` trait and its reqwest implementation
//! - `messenger.rs` - The adapter used by tools: credential check, message
//!   construction and error mapping
//! - `error.rs` - Webex-specific error types

pub mod client;
pub mod credentials;
mod error;
pub mod messenger;

pub use client::{Attachment, MessageReceipt, MessageTransport, OutgoingMessage, WebexClient};
pub use credentials::{ACCESS_TOKEN_ENV, AccessToken, CredentialResolver};
pub use error::WebexError;
pub use messenger::Messenger;
