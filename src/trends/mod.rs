//! Trend aggregation and heuristic insight generation.
//!
//! `trends` produces sparse grouped counts: groups with zero publications
//! are omitted, never zero-filled, and publications with an unknown year or
//! organism are excluded from those groupings (so the by-category total is
//! the corpus size, while the by-year total is the count of known-year
//! publications).
//!
//! `insights` derives pattern statements from the corpus, graph, and index.
//! The policy is heuristic by design and every threshold is named
//! configuration ([`InsightConfig`]), so behavior is reproducible:
//!
//! - RISING_CATEGORY / FALLING_CATEGORY compare a category's publication
//!   count in the most recent third of the observed year range against the
//!   earliest third, firing on the configured ratio. Categories absent from
//!   the earliest third are skipped (no baseline to compare against).
//! - SPARSE_COMBINATION looks at pairs of individually frequent tags whose
//!   co-occurrence in the relationship graph (edges touching both tags)
//!   stays below the configured weight, flagging under-studied combinations.
//! - TOP_TERM surfaces the terms with the highest aggregate tf-idf mass.
//!
//! Output order is deterministic: kind, then subject (top terms by rank).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::InsightConfig;
use crate::corpus::{Corpus, Publication};
use crate::graph::RelationshipGraph;
use crate::index::TfIdfIndex;

/// Sparse grouped publication counts.
#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub by_year: BTreeMap<i32, usize>,
    pub by_category: BTreeMap<String, usize>,
    pub by_organism: BTreeMap<String, usize>,
}

/// Compute grouped counts over the corpus.
#[must_use]
pub fn trends(corpus: &Corpus) -> TrendReport {
    let mut by_year = BTreeMap::new();
    let mut by_category = BTreeMap::new();
    let mut by_organism = BTreeMap::new();

    for publication in corpus {
        if let Some(year) = publication.year {
            *by_year.entry(year).or_insert(0) += 1;
        }
        *by_category
            .entry(publication.category.clone())
            .or_insert(0) += 1;
        if let Some(ref organism) = publication.organism {
            *by_organism.entry(organism.clone()).or_insert(0) += 1;
        }
    }

    TrendReport {
        by_year,
        by_category,
        by_organism,
    }
}

/// Observed year range over publications with a known year.
#[must_use]
pub fn year_range(corpus: &Corpus) -> Option<(i32, i32)> {
    let mut range: Option<(i32, i32)> = None;
    for publication in corpus {
        if let Some(year) = publication.year {
            range = Some(match range {
                None => (year, year),
                Some((lo, hi)) => (lo.min(year), hi.max(year)),
            });
        }
    }
    range
}

/// The closed set of insight kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    RisingCategory,
    FallingCategory,
    SparseCombination,
    TopTerm,
}

/// One derived pattern statement.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub subject: String,
    pub detail: String,
    pub metric: f64,
}

/// Derive insight statements from the built engine state.
#[must_use]
pub fn insights(
    corpus: &Corpus,
    graph: &RelationshipGraph,
    index: &TfIdfIndex,
    config: &InsightConfig,
) -> Vec<Insight> {
    let mut out = Vec::new();
    out.extend(category_shifts(corpus, config));
    out.extend(sparse_combinations(corpus, graph, config));
    out.extend(top_terms(index, config));
    out
}

/// Rising and falling categories over the observed year range.
fn category_shifts(corpus: &Corpus, config: &InsightConfig) -> Vec<Insight> {
    let Some((min_year, max_year)) = year_range(corpus) else {
        return Vec::new();
    };
    let span = max_year - min_year + 1;
    if span < 3 {
        // Too short to split into meaningful thirds.
        return Vec::new();
    }
    let third = span / 3;
    let early_end = min_year + third - 1;
    let recent_start = max_year - third + 1;

    let mut early: BTreeMap<&str, usize> = BTreeMap::new();
    let mut recent: BTreeMap<&str, usize> = BTreeMap::new();
    for publication in corpus {
        let Some(year) = publication.year else {
            continue;
        };
        if year <= early_end {
            *early.entry(publication.category.as_str()).or_insert(0) += 1;
        } else if year >= recent_start {
            *recent.entry(publication.category.as_str()).or_insert(0) += 1;
        }
    }

    let mut rising = Vec::new();
    let mut falling = Vec::new();
    for (category, &early_count) in &early {
        if early_count == 0 {
            continue;
        }
        let recent_count = recent.get(category).copied().unwrap_or(0);
        let ratio = recent_count as f64 / early_count as f64;

        if ratio >= config.rising_ratio {
            rising.push(Insight {
                kind: InsightKind::RisingCategory,
                subject: (*category).to_string(),
                detail: format!(
                    "{recent_count} publications in {recent_start}-{max_year} vs \
                     {early_count} in {min_year}-{early_end}"
                ),
                metric: ratio,
            });
        } else if ratio * config.falling_ratio <= 1.0 {
            falling.push(Insight {
                kind: InsightKind::FallingCategory,
                subject: (*category).to_string(),
                detail: format!(
                    "{recent_count} publications in {recent_start}-{max_year} vs \
                     {early_count} in {min_year}-{early_end}"
                ),
                metric: ratio,
            });
        }
    }

    rising.extend(falling);
    rising
}

/// Frequent tag pairs with little connective tissue in the graph.
///
/// Co-occurrence weight of a tag pair is the number of graph edges whose
/// two endpoint publications together carry both tags.
fn sparse_combinations(
    corpus: &Corpus,
    graph: &RelationshipGraph,
    config: &InsightConfig,
) -> Vec<Insight> {
    let mut tag_frequency: BTreeMap<String, usize> = BTreeMap::new();
    for publication in corpus {
        for tag in publication.combined_tags() {
            *tag_frequency.entry(tag).or_insert(0) += 1;
        }
    }

    let frequent: Vec<&String> = tag_frequency
        .iter()
        .filter(|&(_, &count)| count >= config.min_tag_frequency)
        .map(|(tag, _)| tag)
        .collect();

    let tags_of = |publication: &Publication| publication.combined_tags();

    let mut out = Vec::new();
    for (i, &first) in frequent.iter().enumerate() {
        for &second in &frequent[i + 1..] {
            let cooccurrence = graph
                .edges()
                .iter()
                .filter(|edge| {
                    let (Some(a), Some(b)) =
                        (corpus.get_by_id(&edge.a), corpus.get_by_id(&edge.b))
                    else {
                        return false;
                    };
                    let mut union = tags_of(a);
                    union.extend(tags_of(b));
                    union.contains(first) && union.contains(second)
                })
                .count();

            if cooccurrence < config.sparse_max_weight {
                out.push(Insight {
                    kind: InsightKind::SparseCombination,
                    subject: format!("{first} + {second}"),
                    detail: format!(
                        "tags appear in {} and {} publications but share only \
                         {cooccurrence} graph edges",
                        tag_frequency[first], tag_frequency[second]
                    ),
                    metric: cooccurrence as f64,
                });
            }
        }
    }
    out
}

/// Highest aggregate tf-idf mass terms across the corpus.
fn top_terms(index: &TfIdfIndex, config: &InsightConfig) -> Vec<Insight> {
    index
        .top_terms(config.top_terms)
        .into_iter()
        .map(|(term, mass)| Insight {
            kind: InsightKind::TopTerm,
            subject: term,
            detail: "high aggregate tf-idf weight across the corpus".to_string(),
            metric: mass,
        })
        .collect()
}
