//! News tools.

pub mod fetch;

pub use fetch::{FetchNewsParams, FetchNewsTool};
