//! Relationship graph over publications.
//!
//! Nodes are publication ids in corpus order; an undirected edge connects
//! two publications with weight equal to the size of the intersection of
//! their combined tag sets (category, organism, mission, and free-form tags
//! as one set). Pairs sharing nothing get no edge; self-loops do not exist.
//!
//! Construction goes through an inverted tag index so only pairs sharing at
//! least one tag are ever visited - each shared tag contributes one count to
//! its pair, which sums to exactly the intersection size. The full
//! quadratic sweep over disjoint publications never happens, and the result
//! is identical to one. Rebuilding from an unchanged corpus is
//! deterministic and idempotent.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use serde::Serialize;
use tracing::debug;

use crate::config::GraphConfig;
use crate::corpus::Corpus;

/// An undirected weighted edge between two publications, `a` earlier in
/// corpus order than `b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
    pub weight: usize,
}

/// Read-only derived view of inter-publication relationships.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    nodes: Vec<String>,
    edges: Vec<Edge>,
    index_by_id: HashMap<String, usize>,
}

impl RelationshipGraph {
    /// Build the graph from a corpus.
    #[must_use]
    pub fn build(corpus: &Corpus, config: &GraphConfig) -> Self {
        let nodes: Vec<String> = corpus.iter().map(|p| p.id.clone()).collect();
        let index_by_id: HashMap<String, usize> = nodes
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();

        // Inverted index: tag -> publications carrying it, in corpus order.
        let mut by_tag: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, publication) in corpus.iter().enumerate() {
            for tag in publication.combined_tags() {
                by_tag.entry(tag).or_default().push(idx);
            }
        }

        let mut pair_counts: HashMap<(usize, usize), usize> = HashMap::new();
        for members in by_tag.values() {
            // Members are in ascending corpus order, so i < j always holds.
            for (&i, &j) in members.iter().tuple_combinations() {
                *pair_counts.entry((i, j)).or_insert(0) += 1;
            }
        }

        let min_weight = config.min_shared_tags.max(1);
        let mut edges: Vec<Edge> = pair_counts
            .into_iter()
            .filter(|&(_, weight)| weight >= min_weight)
            .map(|((i, j), weight)| Edge {
                a: nodes[i].clone(),
                b: nodes[j].clone(),
                weight,
            })
            .collect();
        edges.sort_by(|x, y| {
            let xi = (index_by_id[&x.a], index_by_id[&x.b]);
            let yi = (index_by_id[&y.a], index_by_id[&y.b]);
            xi.cmp(&yi)
        });

        debug!(nodes = nodes.len(), edges = edges.len(), "built relationship graph");

        Self {
            nodes,
            edges,
            index_by_id,
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge weight between two publications, in either argument order.
    /// `None` when no edge exists (including self-pairs).
    #[must_use]
    pub fn weight(&self, a: &str, b: &str) -> Option<usize> {
        let (ia, ib) = (self.index_by_id.get(a)?, self.index_by_id.get(b)?);
        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        if lo == hi {
            return None;
        }
        self.edges
            .iter()
            .find(|e| self.index_by_id[&e.a] == *lo && self.index_by_id[&e.b] == *hi)
            .map(|e| e.weight)
    }

    /// Number of edges touching a publication.
    #[must_use]
    pub fn degree(&self, id: &str) -> usize {
        self.edges
            .iter()
            .filter(|e| e.a == id || e.b == id)
            .count()
    }
}
