//! Ranked semantic search over the indexed corpus.
//!
//! A query is normalized through the same pipeline as the corpus, projected
//! into the fixed vocabulary, and scored by cosine similarity against every
//! document whose publication passes the filters. Ranking is similarity
//! descending with corpus insertion order as the stable tie-break, so output
//! is deterministic for any fixed query/filters/limit.
//!
//! A query that normalizes to nothing (empty string, stopwords only, or
//! terms outside the vocabulary yielding an empty projection) scores every
//! candidate 0.0: the result is the filtered corpus in insertion order.
//! This is documented behavior, not an error. An empty corpus or an empty
//! filtered candidate set yields an empty result, also not an error.

pub mod filters;

use rayon::prelude::*;
use serde::Serialize;

use crate::corpus::Corpus;
use crate::index::TfIdfIndex;
use crate::text;

pub use filters::{FilterField, SearchFilters};

/// One ranked search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: String,
    /// Cosine similarity in [0, 1].
    pub score: f32,
}

/// An ordered search result. Recomputed per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    /// Number of publications that passed the filters, before the limit
    /// was applied. Nothing is dropped without showing up here.
    pub total_candidates: usize,
}

/// Rank filtered publications against a free-text query.
///
/// `top_k = None` returns every candidate.
#[must_use]
pub fn search(
    corpus: &Corpus,
    index: &TfIdfIndex,
    query: &str,
    filters: &SearchFilters,
    top_k: Option<usize>,
) -> SearchResult {
    let candidates: Vec<usize> = corpus
        .iter()
        .enumerate()
        .filter(|(_, publication)| filters.matches(publication))
        .map(|(idx, _)| idx)
        .collect();
    let total_candidates = candidates.len();

    let query_vector = index.project(&text::normalize(query));

    let mut scored: Vec<(usize, f32)> = if query_vector.is_empty() {
        // Degenerate query: all candidates at score zero, corpus order.
        candidates.into_iter().map(|idx| (idx, 0.0)).collect()
    } else {
        let mut scored: Vec<(usize, f32)> = candidates
            .into_par_iter()
            .map(|idx| (idx, index.similarity(&query_vector, idx)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored
    };

    if let Some(limit) = top_k {
        scored.truncate(limit);
    }

    let hits = scored
        .into_iter()
        .map(|(idx, score)| SearchHit {
            id: corpus.get(idx).map(|p| p.id.clone()).unwrap_or_default(),
            score,
        })
        .collect();

    SearchResult {
        hits,
        total_candidates,
    }
}
