//! Candidate agents from the agent index subgraph.
//!
//! Fetches every active agent ordered by name, `page_size` records at a
//! time, until a short or empty page signals the end. No filtering by
//! query happens upstream; ranking is entirely local.

use serde::Deserialize;
use serde_json::json;

use crate::config::SubgraphConfig;
use crate::error::SearchError;
use crate::http::build_client;
use crate::source::AgentSource;
use crate::types::Agent;

const AGENTS_QUERY: &str = r#"
query ($first: Int!, $skip: Int!) {
  agents(
    where: { isActive: true },
    orderBy: name,
    orderDirection: asc,
    first: $first,
    skip: $skip
  ) {
    id
    name
    socialLink
    profileUrl
    address
    description
    adminAddress
    isActive
    lastUpdateTime
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<AgentsData>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct AgentsData {
    agents: Vec<Agent>,
}

/// Paginated GraphQL client for the agent index subgraph.
#[derive(Debug, Clone)]
pub struct SubgraphSource {
    config: SubgraphConfig,
    client: reqwest::Client,
}

impl SubgraphSource {
    /// Create a source for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the config is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SubgraphConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = build_client(&config)?;
        Ok(Self { config, client })
    }

    /// Fetch one page of agents starting at `skip`.
    async fn fetch_page(&self, skip: usize) -> Result<Vec<Agent>, SearchError> {
        let body = json!({
            "query": AGENTS_QUERY,
            "variables": { "first": self.config.page_size, "skip": skip },
        });

        let response = self
            .client
            .post(&self.config.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Http(format!("subgraph request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Http(format!("failed to read subgraph response: {e}")))?;

        if !status.is_success() {
            return Err(SearchError::Upstream(format!(
                "GraphQL query failed with status {}: {text}",
                status.as_u16()
            )));
        }

        parse_page(&text)
    }
}

/// Decode a GraphQL response body into the page's agents.
fn parse_page(text: &str) -> Result<Vec<Agent>, SearchError> {
    let parsed: GraphQlResponse = serde_json::from_str(text)
        .map_err(|e| SearchError::Parse(format!("invalid subgraph response: {e}")))?;

    if let Some(errors) = parsed.errors.filter(|e| !e.is_null()) {
        return Err(SearchError::GraphQl(errors.to_string()));
    }

    parsed
        .data
        .map(|d| d.agents)
        .ok_or_else(|| SearchError::Parse("missing data.agents in subgraph response".into()))
}

impl AgentSource for SubgraphSource {
    async fn fetch_all(&self) -> Result<Vec<Agent>, SearchError> {
        let page_size = self.config.page_size;
        let mut agents = Vec::new();
        let mut skip = 0;

        loop {
            let batch = self.fetch_page(skip).await.inspect_err(|e| {
                tracing::warn!(skip, error = %e, "subgraph page fetch failed");
            })?;
            let count = batch.len();
            tracing::debug!(skip, count, "fetched subgraph page");

            agents.extend(batch);
            if count < page_size {
                break;
            }
            skip += page_size;
        }

        tracing::debug!(total = agents.len(), "subgraph drained");
        Ok(agents)
    }

    fn name(&self) -> &'static str {
        "subgraph"
    }
}
