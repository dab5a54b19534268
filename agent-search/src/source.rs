//! Trait definition for pluggable candidate providers.
//!
//! The ranking core needs the complete candidate set up front, so a
//! source hands back every agent it has in one call. Paging, if any, is
//! the source's own business.

use crate::error::SearchError;
use crate::types::Agent;

/// A provider of candidate agents.
///
/// All implementations must be `Send + Sync` so one source can serve
/// concurrent requests.
pub trait AgentSource: Send + Sync {
    /// Fetch every candidate agent, fully drained, in the source's natural order.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the candidates cannot be retrieved.
    fn fetch_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Agent>, SearchError>> + Send;

    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;
}

/// An in-memory source that always returns the same agents.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    agents: Vec<Agent>,
}

impl StaticSource {
    pub fn new(agents: Vec<Agent>) -> Self {
        Self { agents }
    }
}

impl AgentSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Agent>, SearchError> {
        Ok(self.agents.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
