//! Error types for the agent-search crate.
//!
//! The ranking core itself never fails; every variant here comes from
//! configuration checks or from the upstream fetch.

/// Errors that can occur while fetching or ranking agents.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid ranking or subgraph configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP request to the subgraph could not be completed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The subgraph answered with a non-success status.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The subgraph answered with GraphQL `errors`.
    #[error("GraphQL returned errors: {0}")]
    GraphQl(String),

    /// The subgraph response body could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// The blocking ranking worker did not complete.
    #[error("worker error: {0}")]
    Worker(String),
}

/// Convenience type alias for agent-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
