//! Composite text construction for the similarity scorer.
//!
//! Each field's text is repeated `weight` times, every repetition followed
//! by a single space, and the fields are concatenated in [`Field::all`]
//! order. No case folding or punctuation handling happens here.

use crate::types::{Agent, Field, FieldWeights};

/// Build the weighted composite text of `agent`.
pub fn build(agent: &Agent, weights: &FieldWeights) -> String {
    let capacity: usize = Field::all()
        .iter()
        .map(|f| (agent.field(*f).len() + 1) * weights.weight(*f) as usize)
        .sum();
    let mut text = String::with_capacity(capacity);
    for field in Field::all() {
        let value = agent.field(*field);
        for _ in 0..weights.weight(*field) {
            text.push_str(value);
            text.push(' ');
        }
    }
    text
}

/// Build composite texts for every agent, preserving order.
pub fn build_all(agents: &[Agent], weights: &FieldWeights) -> Vec<String> {
    agents.iter().map(|a| build(a, weights)).collect()
}
