//! Publication records and the in-memory corpus.
//!
//! The corpus is loaded once at startup and is read-only for the lifetime of
//! the engine. Search, graph, and trend components hold references into it,
//! never diverging copies. Absent optional fields are `None`, the explicit
//! "unknown" sentinel; empty strings are normalized away at load time so
//! aggregation never conflates the two.

mod derive;
mod loader;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SbkError};

pub use loader::{load_corpus, parse_corpus};

/// A single research publication record. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Publication {
    /// Unique identifier, stable across the process lifetime.
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// Primary category tag (open vocabulary).
    pub category: String,
    /// Primary organism studied, if known.
    #[serde(default)]
    pub organism: Option<String>,
    /// Space mission the work flew on, if any.
    #[serde(default)]
    pub mission: Option<String>,
    /// Publication year, if known.
    #[serde(default)]
    pub year: Option<i32>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Source link (PubMed Central, typically).
    #[serde(default)]
    pub link: Option<String>,
    /// PMC identifier extracted from the link.
    #[serde(default)]
    pub pmc_id: Option<String>,
}

impl Publication {
    /// The text fed to the normalizer and vector index.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.abstract_text)
    }

    /// Combined tag set used for filtering and graph-edge derivation:
    /// category, organism, mission, and free-form tags as one set.
    /// Unknown fields contribute nothing.
    #[must_use]
    pub fn combined_tags(&self) -> BTreeSet<String> {
        let mut set = self.tags.clone();
        set.insert(self.category.clone());
        if let Some(ref organism) = self.organism {
            set.insert(organism.clone());
        }
        if let Some(ref mission) = self.mission {
            set.insert(mission.clone());
        }
        set
    }
}

/// An ordered, id-unique sequence of publications.
///
/// Insertion order is significant: it is the stable tie-break for search
/// ranking and the node order of the relationship graph.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    publications: Vec<Publication>,
    by_id: HashMap<String, usize>,
}

impl Corpus {
    /// Build a corpus, enforcing id uniqueness.
    pub fn new(publications: Vec<Publication>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(publications.len());
        for (idx, publication) in publications.iter().enumerate() {
            if by_id.insert(publication.id.clone(), idx).is_some() {
                return Err(SbkError::DuplicateId(publication.id.clone()));
            }
        }
        Ok(Self {
            publications,
            by_id,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.publications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Publication> {
        self.publications.get(index)
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<&Publication> {
        self.by_id.get(id).map(|&idx| &self.publications[idx])
    }

    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Publication> {
        self.publications.iter()
    }

    #[must_use]
    pub fn publications(&self) -> &[Publication] {
        &self.publications
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Publication;
    type IntoIter = std::slice::Iter<'a, Publication>;

    fn into_iter(self) -> Self::IntoIter {
        self.publications.iter()
    }
}

#[cfg(test)]
pub(crate) fn make_publication(id: &str, title: &str, category: &str, year: Option<i32>) -> Publication {
    Publication {
        id: id.to_string(),
        title: title.to_string(),
        abstract_text: String::new(),
        category: category.to_string(),
        organism: None,
        mission: None,
        year,
        tags: BTreeSet::new(),
        link: None,
        pmc_id: None,
    }
}
