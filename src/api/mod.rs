//! API clients for external services
//!
//! - iTunes: catalog search returning raw result records

pub mod itunes;

pub use itunes::{ItunesClient, SearchError, DEFAULT_BASE_URL, DEFAULT_LIMIT};
