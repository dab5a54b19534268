//! Ranking and subgraph configuration with sensible defaults.
//!
//! [`RankConfig`] controls field weights, the blend between the two
//! signals and how many results are returned. [`SubgraphConfig`] controls
//! where candidate agents are fetched from.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::types::{Blend, Field, FieldWeights};

/// Largest accepted per-field weight.
pub const MAX_FIELD_WEIGHT: u32 = 100;

/// Configuration for a ranking pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Per-field importance, shared by both scorers.
    pub field_weights: FieldWeights,
    /// Blend coefficients for the similarity and lexical signals.
    pub blend: Blend,
    /// Maximum number of agents to return.
    pub top_k: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            field_weights: FieldWeights::default(),
            blend: Blend::default(),
            top_k: 10,
        }
    }
}

impl RankConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `top_k` must be greater than 0
    /// - every field weight must be between 1 and [`MAX_FIELD_WEIGHT`]
    /// - blend coefficients must be finite, non-negative and not both zero
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_k == 0 {
            return Err(SearchError::Config("top_k must be greater than 0".into()));
        }
        for field in Field::all() {
            let weight = self.field_weights.weight(*field);
            if weight == 0 {
                return Err(SearchError::Config(format!(
                    "field weight for {field} must be greater than 0"
                )));
            }
            if weight > MAX_FIELD_WEIGHT {
                return Err(SearchError::Config(format!(
                    "field weight for {field} must be at most {MAX_FIELD_WEIGHT}"
                )));
            }
        }
        let Blend {
            similarity,
            lexical,
        } = self.blend;
        if !similarity.is_finite() || !lexical.is_finite() {
            return Err(SearchError::Config("blend weights must be finite".into()));
        }
        if similarity < 0.0 || lexical < 0.0 {
            return Err(SearchError::Config(
                "blend weights must be non-negative".into(),
            ));
        }
        if similarity == 0.0 && lexical == 0.0 {
            return Err(SearchError::Config(
                "at least one blend weight must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Where and how to fetch candidate agents from the subgraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubgraphConfig {
    /// GraphQL endpoint of the agent index subgraph.
    pub url: String,
    /// Records requested per page (`first`).
    pub page_size: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, the crate's own is used.
    pub user_agent: Option<String>,
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            page_size: 1000,
            timeout_seconds: 30,
            user_agent: None,
        }
    }
}

impl SubgraphConfig {
    /// Creates a config for `url` with default paging and timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `url` must be set and parse as an absolute URL
    /// - `page_size` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.url.trim().is_empty() {
            return Err(SearchError::Config("subgraph url is not set".into()));
        }
        url::Url::parse(&self.url)
            .map_err(|e| SearchError::Config(format!("invalid subgraph url: {e}")))?;
        if self.page_size == 0 {
            return Err(SearchError::Config(
                "page_size must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
