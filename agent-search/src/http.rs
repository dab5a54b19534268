//! Shared HTTP client for subgraph requests.

use std::time::Duration;

use crate::config::SubgraphConfig;
use crate::error::SearchError;

/// User-Agent sent when the config does not override it.
const DEFAULT_USER_AGENT: &str = concat!("agent-search/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] configured for subgraph queries.
///
/// The client has:
/// - Timeout from config
/// - The configured User-Agent, or the crate's default
/// - gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SubgraphConfig) -> Result<reqwest::Client, SearchError> {
    let ua = config
        .user_agent
        .clone()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned());

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}
