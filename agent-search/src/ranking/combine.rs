//! Normalisation, blending and top-K selection.
//!
//! Both score vectors are divided by their own maximum (or by 1 when the
//! maximum is not positive), blended, paired with their agents, filtered
//! to non-zero scores, sorted and truncated.

use std::cmp::Ordering;

use crate::types::{Agent, Blend, RankedAgent};

/// Divide every score by the vector's maximum.
///
/// A maximum `<= 0` (including an empty vector) uses divisor 1, leaving
/// the values unchanged.
pub fn normalize(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let divisor = if max > 0.0 { max } else { 1.0 };
    scores.iter().map(|s| s / divisor).collect()
}

/// Blend two normalised vectors element-wise.
pub fn blend(similarity: &[f64], lexical: &[f64], weights: Blend) -> Vec<f64> {
    similarity
        .iter()
        .zip(lexical)
        .map(|(s, l)| weights.similarity * s + weights.lexical * l)
        .collect()
}

/// Order by score descending, then by input position ascending.
///
/// The position tie-break keeps the natural order the upstream source
/// returned agents in.
fn by_score_then_position(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then(a.0.cmp(&b.0))
}

/// Combine raw similarity and lexical scores into the final ranking.
///
/// Agents with a final score of exactly zero are discarded. At most
/// `top_k` agents are returned.
pub fn combine<'a>(
    similarity: &[f64],
    lexical: &[f64],
    agents: &'a [Agent],
    weights: Blend,
    top_k: usize,
) -> Vec<RankedAgent<'a>> {
    debug_assert_eq!(similarity.len(), agents.len());
    debug_assert_eq!(lexical.len(), agents.len());

    let finals = blend(&normalize(similarity), &normalize(lexical), weights);

    let mut indexed: Vec<(usize, f64)> = finals
        .into_iter()
        .enumerate()
        .filter(|(_, score)| *score != 0.0)
        .collect();
    indexed.sort_by(by_score_then_position);
    indexed.truncate(top_k);

    indexed
        .into_iter()
        .map(|(index, score)| RankedAgent {
            agent: &agents[index],
            score,
        })
        .collect()
}
