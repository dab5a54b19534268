//! # agent-search
//!
//! Hybrid ranking of AI agent index records against a free-text query.
//!
//! ## Design
//!
//! - Candidate agents come from an [`AgentSource`]; the default is the
//!   agent index subgraph, drained page by page before ranking starts
//! - Each agent is scored twice: TF-IDF cosine similarity over weighted
//!   composite texts, and weighted literal substring frequency
//! - Both signals are normalised by their own maximum, blended, and the
//!   non-zero results are sorted with input order as the tie-break
//! - Nothing is cached: term statistics are recomputed for every request
//!
//! Queries are logged only at trace level.

pub mod config;
pub mod error;
pub mod http;
pub mod ranking;
pub mod source;
pub mod subgraph;
pub mod types;

pub use config::{MAX_FIELD_WEIGHT, RankConfig, SubgraphConfig};
pub use error::{Result, SearchError};
pub use source::{AgentSource, StaticSource};
pub use subgraph::SubgraphSource;
pub use types::{Agent, Blend, Field, FieldWeights, RankedAgent, ScoredAgent};

/// Rank already-fetched `agents` against `query`.
///
/// Returns at most `config.top_k` agents with a non-zero score, best
/// first. The agents are borrowed, never modified.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid.
///
/// # Examples
///
/// ```
/// use agent_search::{Agent, RankConfig};
///
/// let agents = vec![Agent {
///     name: "Atlas Agent".into(),
///     ..Default::default()
/// }];
/// let ranked = agent_search::rank("atlas", &agents, &RankConfig::default())?;
/// assert_eq!(ranked.len(), 1);
/// # Ok::<(), agent_search::SearchError>(())
/// ```
pub fn rank<'a>(
    query: &str,
    agents: &'a [Agent],
    config: &RankConfig,
) -> Result<Vec<RankedAgent<'a>>> {
    config.validate()?;
    Ok(ranking::rank_agents(query, agents, config))
}

/// Fetch every candidate from `source` and rank it against `query`.
///
/// Ranking runs on a blocking worker so it never stalls the async runtime.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid config, any error the
/// source reports, or [`SearchError::Worker`] if the ranking worker dies.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> agent_search::Result<()> {
/// use agent_search::{RankConfig, SubgraphConfig, SubgraphSource};
///
/// let source = SubgraphSource::new(SubgraphConfig::new("https://example.com/graphql"))?;
/// let results = agent_search::search("atlas", &source, &RankConfig::default()).await?;
/// for result in &results {
///     println!("{}: {:.3}", result.agent.name, result.score);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search<S: AgentSource>(
    query: &str,
    source: &S,
    config: &RankConfig,
) -> Result<Vec<ScoredAgent>> {
    config.validate()?;
    let agents = source.fetch_all().await?;
    tracing::debug!(source = source.name(), candidates = agents.len(), "candidates fetched");

    let query = query.to_owned();
    let config = config.clone();
    tokio::task::spawn_blocking(move || {
        ranking::rank_agents(&query, &agents, &config)
            .iter()
            .map(RankedAgent::to_owned_scored)
            .collect()
    })
    .await
    .map_err(|e| SearchError::Worker(format!("ranking task failed: {e}")))
}
