//! Criterion benchmarks for performance-critical paths: index construction,
//! query scoring, and relationship graph construction over synthetic corpora.

use std::collections::BTreeSet;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use sbk::config::GraphConfig;
use sbk::corpus::{Corpus, Publication};
use sbk::graph::RelationshipGraph;
use sbk::index::TfIdfIndex;
use sbk::search::{self, SearchFilters};

const VOCAB: &[&str] = &[
    "microgravity",
    "spaceflight",
    "bone",
    "muscle",
    "radiation",
    "plant",
    "growth",
    "density",
    "immune",
    "expression",
    "atrophy",
    "gravitropism",
    "osteoclast",
    "lymphocyte",
    "mitochondria",
    "transcriptome",
];

const CATEGORIES: &[&str] = &[
    "bone",
    "muscle",
    "plants",
    "immune",
    "radiation",
    "microgravity",
];

const TAGS: &[&str] = &["microgravity", "iss", "omics", "stem-cells", "dna-damage"];

fn synthetic_corpus(count: usize) -> Corpus {
    let publications = (0..count)
        .map(|i| {
            let title: Vec<&str> = (0..8).map(|j| VOCAB[(i * 7 + j * 3) % VOCAB.len()]).collect();
            let abstract_words: Vec<&str> =
                (0..40).map(|j| VOCAB[(i * 11 + j * 5) % VOCAB.len()]).collect();
            let tags: BTreeSet<String> = (0..(i % 4))
                .map(|j| TAGS[(i + j) % TAGS.len()].to_string())
                .collect();
            Publication {
                id: format!("PMC{i}"),
                title: title.join(" "),
                abstract_text: abstract_words.join(" "),
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
                organism: (i % 3 == 0).then(|| "Mus musculus".to_string()),
                mission: None,
                year: Some(2000 + (i % 24) as i32),
                tags,
                link: None,
                pmc_id: None,
            }
        })
        .collect();
    Corpus::new(publications).unwrap()
}

fn index_build_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [100, 500, 1000, 2000].iter() {
        let corpus = synthetic_corpus(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("corpus_size", size), &corpus, |b, corpus| {
            b.iter(|| TfIdfIndex::build(black_box(corpus)))
        });
    }

    group.finish();
}

fn search_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 500, 1000, 2000].iter() {
        let corpus = synthetic_corpus(*size);
        let index = TfIdfIndex::build(&corpus);
        let filters = SearchFilters::new();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(
            BenchmarkId::new("corpus_size", size),
            &(&corpus, &index),
            |b, (corpus, index)| {
                b.iter(|| {
                    search::search(
                        black_box(corpus),
                        black_box(index),
                        black_box("bone density microgravity"),
                        &filters,
                        Some(10),
                    )
                })
            },
        );
    }

    group.finish();

    // Filtered search: the candidate set shrinks before scoring.
    let mut filtered_group = c.benchmark_group("search_filtered");

    let corpus = synthetic_corpus(1000);
    let index = TfIdfIndex::build(&corpus);
    let filters = SearchFilters::new().with_category("bone");

    filtered_group.bench_function("category_filter_1000", |b| {
        b.iter(|| {
            search::search(
                black_box(&corpus),
                black_box(&index),
                black_box("bone density microgravity"),
                &filters,
                Some(10),
            )
        })
    });

    // Degenerate query: no scoring, candidate listing only.
    let unfiltered = SearchFilters::new();
    filtered_group.bench_function("empty_query_1000", |b| {
        b.iter(|| {
            search::search(
                black_box(&corpus),
                black_box(&index),
                black_box(""),
                &unfiltered,
                Some(10),
            )
        })
    });

    filtered_group.finish();
}

fn graph_build_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    let config = GraphConfig::default();

    for size in [100, 500, 1000].iter() {
        let corpus = synthetic_corpus(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("corpus_size", size), &corpus, |b, corpus| {
            b.iter(|| RelationshipGraph::build(black_box(corpus), &config))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    index_build_benchmarks,
    search_benchmarks,
    graph_build_benchmarks,
);

criterion_main!(benches);
