//! The knowledge engine facade.
//!
//! [`KnowledgeEngine`] owns the corpus, the TF-IDF index, and the
//! relationship graph as one immutable [`EngineState`], published through an
//! atomic pointer swap. `load` builds a complete new state before storing
//! it, so in-flight reads never observe a partially built index; they keep
//! the `Arc` they grabbed until they finish. After the initial load every
//! operation is read-only and safe to call from any number of threads
//! without locking.
//!
//! Queries issued before the first load fail with
//! [`SbkError::IndexNotReady`]; the caller decides whether to queue or
//! reject.

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::corpus::{Corpus, Publication};
use crate::error::{Result, SbkError};
use crate::graph::{Edge, RelationshipGraph};
use crate::index::TfIdfIndex;
use crate::search::{SearchFilters, SearchResult};
use crate::trends::{Insight, TrendReport};
use crate::{search, trends};

/// Everything derived from one corpus load. Immutable once built.
#[derive(Debug)]
pub struct EngineState {
    pub corpus: Corpus,
    pub index: TfIdfIndex,
    pub graph: RelationshipGraph,
}

/// Graph shape handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

/// Corpus-level statistics.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    pub total_publications: usize,
    pub category_counts: BTreeMap<String, usize>,
    pub year_range: Option<(i32, i32)>,
    pub graph_nodes: usize,
    pub graph_edges: usize,
}

/// One page of the publication listing.
#[derive(Debug, Clone, Serialize)]
pub struct PublicationPage {
    pub publications: Vec<Publication>,
    pub total: usize,
    pub offset: usize,
}

/// The engine. Construct, `load` a corpus, then serve reads.
pub struct KnowledgeEngine {
    config: Config,
    state: ArcSwapOption<EngineState>,
}

impl KnowledgeEngine {
    /// Create an engine with no corpus loaded. All query operations return
    /// [`SbkError::IndexNotReady`] until [`Self::load`] completes.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: ArcSwapOption::const_empty(),
        }
    }

    /// Build index and graph from a corpus and publish the new state
    /// atomically. Also used for wholesale reloads when source data
    /// changes.
    pub fn load(&self, corpus: Corpus) {
        let index = TfIdfIndex::build(&corpus);
        let graph = RelationshipGraph::build(&corpus, &self.config.graph);
        info!(
            publications = corpus.len(),
            vocabulary = index.vocabulary_size(),
            graph_edges = graph.edge_count(),
            "engine state built"
        );
        self.state.store(Some(Arc::new(EngineState {
            corpus,
            index,
            graph,
        })));
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state.load().is_some()
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    fn state(&self) -> Result<Arc<EngineState>> {
        self.state.load_full().ok_or(SbkError::IndexNotReady)
    }

    /// Ranked semantic search with structured filters.
    ///
    /// `top_k = None` returns the whole filtered candidate set.
    pub fn search(
        &self,
        query: &str,
        filters: &SearchFilters,
        top_k: Option<usize>,
    ) -> Result<SearchResult> {
        let state = self.state()?;
        Ok(search::search(
            &state.corpus,
            &state.index,
            query,
            filters,
            top_k,
        ))
    }

    /// Grouped publication counts by year, category, and organism.
    pub fn trends(&self) -> Result<TrendReport> {
        let state = self.state()?;
        Ok(trends::trends(&state.corpus))
    }

    /// Heuristic pattern statements, thresholds per the engine config.
    pub fn insights(&self) -> Result<Vec<Insight>> {
        let state = self.state()?;
        Ok(trends::insights(
            &state.corpus,
            &state.graph,
            &state.index,
            &self.config.insights,
        ))
    }

    /// The relationship graph for visual exploration.
    pub fn graph_view(&self) -> Result<GraphView> {
        let state = self.state()?;
        Ok(GraphView {
            nodes: state.graph.nodes().to_vec(),
            edges: state.graph.edges().to_vec(),
        })
    }

    /// Corpus statistics. Counts here always reflect the full corpus; no
    /// query ever drops results without them being visible against these
    /// totals.
    pub fn stats(&self) -> Result<EngineStats> {
        let state = self.state()?;
        let report = trends::trends(&state.corpus);
        Ok(EngineStats {
            total_publications: state.corpus.len(),
            category_counts: report.by_category,
            year_range: trends::year_range(&state.corpus),
            graph_nodes: state.graph.node_count(),
            graph_edges: state.graph.edge_count(),
        })
    }

    /// Look up a single publication by id.
    pub fn publication(&self, id: &str) -> Result<Option<Publication>> {
        let state = self.state()?;
        Ok(state.corpus.get_by_id(id).cloned())
    }

    /// Page through the corpus in insertion order.
    pub fn publications(&self, offset: usize, limit: usize) -> Result<PublicationPage> {
        let state = self.state()?;
        let publications = state
            .corpus
            .publications()
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(PublicationPage {
            publications,
            total: state.corpus.len(),
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::make_publication;

    fn loaded_engine() -> KnowledgeEngine {
        let engine = KnowledgeEngine::new(Config::default());
        let corpus = Corpus::new(vec![
            make_publication("1", "bone loss in microgravity", "bone", Some(2015)),
            make_publication("2", "plant growth gravitropism", "plant", Some(2019)),
        ])
        .unwrap();
        engine.load(corpus);
        engine
    }

    #[test]
    fn test_queries_before_load_fail() {
        let engine = KnowledgeEngine::new(Config::default());
        assert!(!engine.is_ready());
        assert!(matches!(
            engine.search("bone", &SearchFilters::new(), None),
            Err(SbkError::IndexNotReady)
        ));
        assert!(matches!(engine.trends(), Err(SbkError::IndexNotReady)));
        assert!(matches!(engine.stats(), Err(SbkError::IndexNotReady)));
        assert!(matches!(engine.graph_view(), Err(SbkError::IndexNotReady)));
        assert!(matches!(engine.insights(), Err(SbkError::IndexNotReady)));
    }

    #[test]
    fn test_two_document_worked_example() {
        let engine = loaded_engine();

        // Free-text search ranks the bone publication first with a real
        // score; the plant publication scores near zero.
        let result = engine
            .search("microgravity bone", &SearchFilters::new(), Some(5))
            .unwrap();
        assert_eq!(result.hits[0].id, "1");
        assert!(result.hits[0].score > 0.0);
        let plant = result.hits.iter().find(|h| h.id == "2").unwrap();
        assert!(plant.score < 1e-6);

        // Empty query with a category filter returns exactly the filtered
        // set at score zero.
        let filters = SearchFilters::new().with_category("plant");
        let result = engine.search("", &filters, Some(5)).unwrap();
        assert_eq!(result.hits.len(), 1);
        assert_eq!(result.hits[0].id, "2");
        assert_eq!(result.hits[0].score, 0.0);

        // No shared tags between the two publications: zero edges.
        let view = engine.graph_view().unwrap();
        assert_eq!(view.nodes.len(), 2);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_empty_corpus_is_valid_degenerate_case() {
        let engine = KnowledgeEngine::new(Config::default());
        engine.load(Corpus::new(Vec::new()).unwrap());

        assert!(engine.is_ready());
        let result = engine.search("anything", &SearchFilters::new(), None).unwrap();
        assert!(result.hits.is_empty());

        let stats = engine.stats().unwrap();
        assert_eq!(stats.total_publications, 0);
        assert!(stats.year_range.is_none());
    }

    #[test]
    fn test_reload_swaps_state() {
        let engine = loaded_engine();
        assert_eq!(engine.stats().unwrap().total_publications, 2);

        engine.load(
            Corpus::new(vec![make_publication("9", "muscle atrophy", "muscle", Some(2020))])
                .unwrap(),
        );
        let stats = engine.stats().unwrap();
        assert_eq!(stats.total_publications, 1);
        assert_eq!(stats.year_range, Some((2020, 2020)));
    }

    #[test]
    fn test_stats_totals() {
        let engine = loaded_engine();
        let stats = engine.stats().unwrap();
        assert_eq!(stats.total_publications, 2);
        let total: usize = stats.category_counts.values().sum();
        assert_eq!(total, 2);
        assert_eq!(stats.year_range, Some((2015, 2019)));
        assert_eq!(stats.graph_nodes, 2);
        assert_eq!(stats.graph_edges, 0);
    }

    #[test]
    fn test_publication_paging() {
        let engine = loaded_engine();
        let page = engine.publications(1, 10).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.publications.len(), 1);
        assert_eq!(page.publications[0].id, "2");

        let beyond = engine.publications(5, 10).unwrap();
        assert!(beyond.publications.is_empty());
        assert_eq!(beyond.total, 2);
    }

    #[test]
    fn test_concurrent_reads() {
        let engine = Arc::new(loaded_engine());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let engine = Arc::clone(&engine);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    let result = engine
                        .search("bone microgravity", &SearchFilters::new(), Some(5))
                        .unwrap();
                    assert_eq!(result.hits[0].id, "1");
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
