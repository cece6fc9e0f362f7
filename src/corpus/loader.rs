//! Corpus loading from processed-publication JSON.
//!
//! The ingestion pipeline upstream of this crate materializes publications
//! as a JSON array. Records may be sparse (title and link only); missing
//! metadata is derived from the title here, once, at load time. Empty
//! strings in optional fields are normalized to the unknown sentinel.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::corpus::{Corpus, Publication, derive};
use crate::error::{Result, SbkError};

/// A publication record as it appears on disk. Everything except the title
/// is optional.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<serde_json::Value>,
    title: String,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    organism: Option<String>,
    #[serde(rename = "space_mission", alias = "mission", default)]
    mission: Option<String>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    tags: Option<BTreeSet<String>>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    pmc_id: Option<String>,
}

/// Load a corpus from a JSON file.
pub fn load_corpus(path: &Path) -> Result<Corpus> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| SbkError::CorpusLoad(format!("read {}: {err}", path.display())))?;
    let corpus = parse_corpus(&raw)?;
    info!(
        publications = corpus.len(),
        path = %path.display(),
        "loaded corpus"
    );
    Ok(corpus)
}

/// Parse a corpus from a JSON array of publication records.
pub fn parse_corpus(raw: &str) -> Result<Corpus> {
    let records: Vec<RawRecord> = serde_json::from_str(raw)
        .map_err(|err| SbkError::CorpusLoad(format!("parse corpus JSON: {err}")))?;

    let publications = records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| materialize(idx, record))
        .collect::<Vec<_>>();

    Corpus::new(publications)
}

/// Fill in missing metadata and normalize sentinels for one record.
fn materialize(idx: usize, record: RawRecord) -> Publication {
    let pmc_id = non_empty(record.pmc_id)
        .or_else(|| record.link.as_deref().and_then(derive::pmc_id_from_link));

    let id = record
        .id
        .and_then(|v| match v {
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .or_else(|| pmc_id.as_ref().map(|pmc| format!("PMC{pmc}")))
        .unwrap_or_else(|| format!("pub_{}", idx + 1));

    let category = non_empty(record.category)
        .unwrap_or_else(|| derive::category_from_title(&record.title));

    let tags = match record.tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => derive::tags_from_title(&record.title),
    };

    let organism =
        non_empty(record.organism).or_else(|| derive::organism_from_title(&record.title));
    let mission =
        non_empty(record.mission).or_else(|| derive::mission_from_title(&record.title));
    let year = record.year.or_else(|| derive::year_from_title(&record.title));

    Publication {
        id,
        title: record.title,
        abstract_text: record.abstract_text.unwrap_or_default(),
        category,
        organism,
        mission,
        year,
        tags,
        link: non_empty(record.link),
        pmc_id,
    }
}

/// Empty strings and the original pipeline's textual placeholders count as
/// unknown.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| {
        !s.is_empty() && s != "unknown" && s != "Multiple/Unknown" && s != "Ground-based/Simulated"
    })
}
