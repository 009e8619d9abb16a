//! iTunes Search API client
//!
//! One GET per search term, returning the raw `results` array.
//! API docs: https://performance-partners.apple.com/search-api

use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::RawRecord;

/// Public endpoint of the iTunes Search API
pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Result count requested when the caller doesn't say otherwise
pub const DEFAULT_LIMIT: u32 = 20;

/// Search API error types
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl SearchError {
    /// Transport failures and bad statuses, as opposed to undecodable bodies
    pub fn is_network(&self) -> bool {
        matches!(self, SearchError::Network(_) | SearchError::Status(_))
    }
}

/// iTunes Search API client
pub struct ItunesClient {
    base_url: String,
    client: reqwest::Client,
}

impl ItunesClient {
    /// Create a client for the public endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search the catalog and return at most `limit` raw records, in API order
    pub async fn search(&self, term: &str, limit: u32) -> Result<Vec<RawRecord>, SearchError> {
        let url = format!(
            "{}/search?term={}&limit={}",
            self.base_url,
            urlencoding::encode(term),
            limit
        );
        debug!(%url, "searching");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let records = parse_results(&body)?;
        debug!(count = records.len(), "search complete");
        Ok(records)
    }
}

impl Default for ItunesClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// Decode a response body into raw records, skipping non-object entries
fn parse_results(body: &str) -> Result<Vec<RawRecord>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::MalformedResponse(format!("JSON parse error: {}", e)))?;

    Ok(response
        .results
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            other => {
                debug!(entry = %other, "skipping non-object search result");
                None
            }
        })
        .collect())
}
