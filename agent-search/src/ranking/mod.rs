//! Hybrid ranking: TF-IDF similarity blended with weighted substring frequency.
//!
//! # Pipeline
//!
//! 1. Build a weighted composite text per agent ([`weighted_text`])
//! 2. Fit a TF-IDF space over those texts and score the query ([`tfidf`])
//! 3. Count weighted literal token matches per agent ([`lexical`])
//! 4. Normalise, blend, drop zeros, sort and truncate ([`combine`])
//!
//! The pipeline is pure: it keeps no state between calls and never
//! modifies the agents it is given.

pub mod combine;
pub mod lexical;
pub mod stop_words;
pub mod tfidf;
pub mod weighted_text;

use crate::config::RankConfig;
use crate::types::{Agent, RankedAgent};

use lexical::TokenSet;

/// Rank `agents` against `query` and return at most `config.top_k` matches.
///
/// The config is assumed valid; see [`RankConfig::validate`].
pub fn rank_agents<'a>(query: &str, agents: &'a [Agent], config: &RankConfig) -> Vec<RankedAgent<'a>> {
    if agents.is_empty() {
        return Vec::new();
    }
    tracing::trace!(query, "ranking agents");

    let texts = weighted_text::build_all(agents, &config.field_weights);
    let similarity = tfidf::score(query, &texts);

    let tokens = TokenSet::from_query(query);
    let lexical = lexical::score(&tokens, agents, &config.field_weights);

    let ranked = combine::combine(&similarity, &lexical, agents, config.blend, config.top_k);
    tracing::debug!(
        candidates = agents.len(),
        returned = ranked.len(),
        "ranked agents"
    );
    ranked
}
