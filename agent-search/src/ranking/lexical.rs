//! Weighted substring frequency scoring.
//!
//! The query becomes a [`TokenSet`]: the whole lower-cased phrase, plus
//! each whitespace-separated word when the phrase contains a space. For
//! every field, non-overlapping literal occurrences of every token are
//! counted case-insensitively and multiplied by the field weight.
//!
//! A field containing the exact phrase `"a b"` therefore counts three
//! times: once for the phrase and once for each word. Exact-phrase matches
//! are amplified on purpose.

use crate::types::{Agent, Field, FieldWeights};

/// Lower-cased query phrase plus its words for multi-word queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    tokens: Vec<String>,
}

impl TokenSet {
    /// Derive the token set for `query`.
    ///
    /// Duplicated words are kept, so `"go go"` counts each match of `"go"` twice.
    pub fn from_query(query: &str) -> Self {
        let phrase = query.to_lowercase();
        let mut tokens = Vec::new();
        if phrase.contains(' ') {
            tokens.extend(phrase.split_whitespace().map(str::to_owned));
        }
        tokens.insert(0, phrase);
        tokens.retain(|t| !t.is_empty());
        Self { tokens }
    }

    /// The tokens in derivation order, phrase first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Total non-overlapping occurrences of all tokens in `text`, ignoring case.
    pub fn count_in(&self, text: &str) -> u64 {
        if text.is_empty() {
            return 0;
        }
        let lowered = text.to_lowercase();
        self.tokens
            .iter()
            .map(|t| lowered.matches(t.as_str()).count() as u64)
            .sum()
    }
}

/// Raw weighted match count of `tokens` across one agent's fields.
pub fn score_agent(tokens: &TokenSet, agent: &Agent, weights: &FieldWeights) -> u64 {
    Field::all()
        .iter()
        .map(|f| u64::from(weights.weight(*f)) * tokens.count_in(agent.field(*f)))
        .sum()
}

/// Raw lexical scores for every agent, in input order.
pub fn score(tokens: &TokenSet, agents: &[Agent], weights: &FieldWeights) -> Vec<f64> {
    agents
        .iter()
        .map(|a| score_agent(tokens, a, weights) as f64)
        .collect()
}
