//! Cards domain module.
//!
//! This module turns a static Adaptive Card template plus caller-supplied
//! news fields into a validated JSON document ready to be attached to a
//! Webex message.
//!
//! ## Architecture
//!
//! - `template.rs` - Template loading, placeholder substitution and parsing
//! - `error.rs` - Card-specific error types
//!
//! Templates are re-read on every render; nothing is cached between calls.

mod error;
pub mod template;

pub use error::CardError;
pub use template::{ADAPTIVE_CARD_CONTENT_TYPE, CardFields, CardTemplate, PLACEHOLDERS, render_card};
