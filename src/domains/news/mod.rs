//! News domain module.
//!
//! Fetches the recency-windowed Google News RSS feed used by the
//! `fetch_news` tool. The feed body is returned as opaque text; parsing it
//! is left to the caller.

mod error;
pub mod feed;

pub use error::FeedError;
pub use feed::{FeedClient, build_feed_url};
