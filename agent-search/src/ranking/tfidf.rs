//! TF-IDF cosine similarity over a request-local corpus.
//!
//! The corpus is fitted fresh for every ranking pass; nothing is cached.
//!
//! # Weighting
//!
//! ```text
//! idf(t)  = ln((1 + n) / (1 + df(t))) + 1
//! w(t, d) = count(t, d) * idf(t)
//! ```
//!
//! Document and query vectors are L2-normalised, so cosine similarity is
//! their dot product. A zero vector has similarity 0 with everything.

use std::collections::{HashMap, HashSet};

use super::stop_words::is_stop_word;

/// A sparse vector: `(term index, weight)` pairs sorted by term index.
type SparseVec = Vec<(usize, f64)>;

/// Split `text` into lower-cased terms of at least two word characters,
/// dropping English stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2 && !is_stop_word(t))
        .map(str::to_owned)
        .collect()
}

/// Vector space fitted on one corpus of composite texts.
#[derive(Debug, Clone)]
pub struct TfIdfSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    documents: Vec<SparseVec>,
}

impl TfIdfSpace {
    /// Fit vocabulary and IDF weights on `corpus` and vectorise every document.
    pub fn fit(corpus: &[String]) -> Self {
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|d| tokenize(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        for terms in &tokenized {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in terms {
                let next = vocabulary.len();
                let index = *vocabulary.entry(term.clone()).or_insert(next);
                if index == doc_freq.len() {
                    doc_freq.push(0);
                }
                if seen.insert(index) {
                    doc_freq[index] += 1;
                }
            }
        }

        let n = corpus.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0)
            .collect();

        let mut space = Self {
            vocabulary,
            idf,
            documents: Vec::with_capacity(tokenized.len()),
        };
        space.documents = tokenized.iter().map(|t| space.vectorize(t)).collect();
        space
    }

    /// Number of distinct terms in the fitted vocabulary.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Project arbitrary text into this space; unknown terms are ignored.
    fn transform(&self, text: &str) -> SparseVec {
        self.vectorize(&tokenize(text))
    }

    fn vectorize(&self, terms: &[String]) -> SparseVec {
        let mut counts: HashMap<usize, u32> = HashMap::new();
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        let mut vector: SparseVec = counts
            .into_iter()
            .map(|(index, count)| (index, f64::from(count) * self.idf[index]))
            .collect();
        vector.sort_unstable_by_key(|&(index, _)| index);

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// Cosine similarity of `query` against every fitted document, in corpus order.
    pub fn similarities(&self, query: &str) -> Vec<f64> {
        let query_vec = self.transform(query);
        self.documents
            .iter()
            .map(|doc| cosine(&query_vec, doc))
            .collect()
    }
}

/// Dot product of two L2-normalised sparse vectors.
fn cosine(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                dot += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

/// Score `query` against each composite text. Returns one value per text.
pub fn score(query: &str, corpus: &[String]) -> Vec<f64> {
    if corpus.is_empty() {
        return Vec::new();
    }
    let space = TfIdfSpace::fit(corpus);
    tracing::debug!(
        documents = corpus.len(),
        vocabulary = space.vocabulary_len(),
        "fitted tf-idf space"
    );
    space.similarities(query)
}
