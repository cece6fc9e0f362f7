//! TF-IDF vector index over the normalized corpus.
//!
//! The vocabulary is built once from the full corpus at construction time
//! and is immutable afterwards: queries are projected into the fixed
//! vocabulary and unseen query terms contribute zero weight, never a
//! re-index. Building twice from the same corpus yields identical
//! vocabulary, idf values, and document vectors.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::debug;

use crate::corpus::Corpus;
use crate::text;

/// A sparse vector of (term column, weight) entries, sorted by column.
#[derive(Debug, Clone, Default)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
    norm: f32,
}

impl SparseVector {
    fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(term, _)| term);
        let norm = entries.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
        Self { entries, norm }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn norm(&self) -> f32 {
        self.norm
    }

    /// Dot product via merge of the two sorted entry lists.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f32 {
        let mut sum = 0.0;
        let (mut i, mut j) = (0, 0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity in [0, 1]; zero when either vector is empty.
    #[must_use]
    pub fn cosine(&self, other: &Self) -> f32 {
        if self.norm == 0.0 || other.norm == 0.0 {
            return 0.0;
        }
        (self.dot(other) / (self.norm * other.norm)).clamp(0.0, 1.0)
    }
}

/// Term-by-document TF-IDF weight matrix with a fixed vocabulary.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, u32>,
    terms: Vec<String>,
    document_frequency: Vec<u32>,
    idf: Vec<f32>,
    documents: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Build the index from a corpus. Normalization runs exactly once per
    /// publication here; the resulting token sequences are not retained
    /// beyond the build.
    #[must_use]
    pub fn build(corpus: &Corpus) -> Self {
        let normalized: Vec<Vec<String>> = corpus
            .publications()
            .par_iter()
            .map(|publication| text::normalize(&publication.text()))
            .collect();

        // Deterministic column order: terms sorted lexicographically.
        let mut terms: Vec<String> = normalized
            .iter()
            .flatten()
            .cloned()
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        terms.shrink_to_fit();

        let vocabulary: HashMap<String, u32> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx as u32))
            .collect();

        let mut document_frequency = vec![0u32; terms.len()];
        for tokens in &normalized {
            let mut seen = std::collections::HashSet::new();
            for token in tokens {
                let column = vocabulary[token.as_str()];
                if seen.insert(column) {
                    document_frequency[column as usize] += 1;
                }
            }
        }

        let doc_count = corpus.len() as f32;
        let idf: Vec<f32> = document_frequency
            .iter()
            .map(|&df| {
                // Vocabulary only contains occurring terms, so df >= 1.
                (doc_count / df as f32).ln()
            })
            .collect();

        let documents: Vec<SparseVector> = normalized
            .par_iter()
            .map(|tokens| weigh(tokens, &vocabulary, &idf))
            .collect();

        debug!(
            documents = documents.len(),
            vocabulary = terms.len(),
            "built tf-idf index"
        );

        Self {
            vocabulary,
            terms,
            document_frequency,
            idf,
            documents,
        }
    }

    /// Project a normalized token sequence into the fixed vocabulary.
    /// Read-only: unseen terms contribute nothing.
    #[must_use]
    pub fn project(&self, tokens: &[String]) -> SparseVector {
        weigh(tokens, &self.vocabulary, &self.idf)
    }

    /// Cosine similarity between a projected query and document `doc`.
    #[must_use]
    pub fn similarity(&self, query: &SparseVector, doc: usize) -> f32 {
        self.documents
            .get(doc)
            .map_or(0.0, |vector| query.cosine(vector))
    }

    #[must_use]
    pub fn document(&self, doc: usize) -> Option<&SparseVector> {
        self.documents.get(doc)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Corpus-wide idf for a term, if it is in the vocabulary.
    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&col| self.idf[col as usize])
    }

    /// Document frequency for a term, if it is in the vocabulary.
    #[must_use]
    pub fn document_frequency(&self, term: &str) -> Option<u32> {
        self.vocabulary
            .get(term)
            .map(|&col| self.document_frequency[col as usize])
    }

    /// Terms ranked by total tf-idf mass across the corpus, descending;
    /// ties broken lexicographically. Used for TOP_TERM insights.
    #[must_use]
    pub fn top_terms(&self, limit: usize) -> Vec<(String, f64)> {
        let mut mass = vec![0.0f64; self.terms.len()];
        for document in &self.documents {
            for &(column, weight) in &document.entries {
                mass[column as usize] += f64::from(weight);
            }
        }

        let mut ranked: Vec<(String, f64)> = mass
            .into_iter()
            .enumerate()
            .filter(|&(_, m)| m > 0.0)
            .map(|(column, m)| (self.terms[column].clone(), m))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(limit);
        ranked
    }
}

/// Length-normalized tf times idf over one token sequence.
fn weigh(tokens: &[String], vocabulary: &HashMap<String, u32>, idf: &[f32]) -> SparseVector {
    if tokens.is_empty() {
        return SparseVector::default();
    }

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for token in tokens {
        if let Some(&column) = vocabulary.get(token.as_str()) {
            *counts.entry(column).or_insert(0) += 1;
        }
    }

    let length = tokens.len() as f32;
    let entries: Vec<(u32, f32)> = counts
        .into_iter()
        .map(|(column, count)| (column, (count as f32 / length) * idf[column as usize]))
        .filter(|&(_, weight)| weight != 0.0)
        .collect();

    SparseVector::from_entries(entries)
}
