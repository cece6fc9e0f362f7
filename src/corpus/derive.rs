//! Metadata derivation for records that arrive without structured fields.
//!
//! Source data frequently carries only a title and a link. These routines
//! fill in category, tags, organism, mission, year, and PMC id from keyword
//! tables and regexes. All derivation is deterministic: the same title
//! always produces the same metadata.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19|20)\d{2}").expect("year regex"));

static PMC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"PMC(\d+)").expect("pmc regex"));

/// Keyword patterns mapped to tags.
const TAG_PATTERNS: &[(&str, &[&str])] = &[
    ("microgravity", &["microgravity", "spaceflight", "space", "zero gravity", "weightlessness"]),
    ("radiation", &["radiation", "irradiation", "dose", "ionizing", "cosmic", "galactic"]),
    ("plants", &["plant", "arabidopsis", "root", "gravitropism", "seedling", "brassica"]),
    ("animals", &["mouse", "mice", "rat", "drosophila", "caenorhabditis", "c. elegans"]),
    ("bone", &["bone", "osteoclast", "osteoblast", "skeletal", "calcium", "bone loss"]),
    ("muscle", &["muscle", "muscular", "myocyte", "sarcopenia", "atrophy"]),
    ("immune", &["immune", "immunity", "lymphocyte", "cytokine", "inflammation", "t-cell"]),
    ("iss", &["international space station", "iss", "space station"]),
    ("dna", &["dna", "genetic", "gene", "transcriptome", "genome", "expression"]),
    ("cell", &["cell", "cellular", "mitochondria", "apoptosis", "stem cell"]),
    ("cardiovascular", &["heart", "cardiac", "cardiovascular", "blood", "circulation"]),
    ("neural", &["brain", "neural", "neuron", "cognitive", "nervous"]),
    ("metabolic", &["metabolism", "metabolic", "glucose", "insulin", "energy"]),
    ("oxidative", &["oxidative", "stress", "reactive oxygen", "antioxidant"]),
    ("protein", &["protein", "proteome", "proteomic", "enzyme"]),
    ("rna", &["rna", "transcript", "mrna", "microrna", "rna-seq"]),
];

/// Category rules, checked in order; first match wins.
const CATEGORY_RULES: &[(&str, &[&str])] = &[
    ("plants", &["plant", "arabidopsis", "root", "gravitropism", "seedling"]),
    ("animals", &["mouse", "mice", "rat", "drosophila", "caenorhabditis"]),
    ("bone", &["bone", "osteoclast", "osteoblast", "skeletal", "calcium"]),
    ("muscle", &["muscle", "muscular", "myocyte", "sarcopenia"]),
    ("immune", &["immune", "immunity", "lymphocyte", "cytokine"]),
    ("radiation", &["radiation", "irradiation", "dose", "cosmic"]),
    ("cardiovascular", &["heart", "cardiac", "cardiovascular"]),
    ("neural", &["brain", "neural", "neuron", "cognitive"]),
];

const ORGANISM_RULES: &[(&str, &[&str])] = &[
    ("Mus musculus", &["mouse", "mice"]),
    ("Rattus norvegicus", &["rat"]),
    ("Drosophila melanogaster", &["drosophila"]),
    ("Caenorhabditis elegans", &["caenorhabditis", "c. elegans"]),
    ("Arabidopsis thaliana", &["arabidopsis"]),
    ("Homo sapiens", &["human"]),
];

const MISSION_RULES: &[(&str, &[&str])] = &[
    ("Bion-M1", &["bion-m"]),
    ("Inspiration4", &["inspiration4"]),
    ("International Space Station", &["iss", "international space station"]),
    ("Space Shuttle", &["sts-"]),
];

/// Extract tags whose keyword patterns appear in the title.
pub fn tags_from_title(title: &str) -> BTreeSet<String> {
    let lower = title.to_lowercase();
    TAG_PATTERNS
        .iter()
        .filter(|(_, patterns)| patterns.iter().any(|p| lower.contains(p)))
        .map(|(tag, _)| (*tag).to_string())
        .collect()
}

/// Categorize a publication from its title. Falls back to "microgravity",
/// the dominant category in space-biology corpora.
pub fn category_from_title(title: &str) -> String {
    let lower = title.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map_or_else(|| "microgravity".to_string(), |(cat, _)| (*cat).to_string())
}

/// Extract the primary organism studied, if the title names one.
pub fn organism_from_title(title: &str) -> Option<String> {
    let lower = title.to_lowercase();
    ORGANISM_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(organism, _)| (*organism).to_string())
}

/// Extract the space mission, if the title names one. Ground-based and
/// simulated studies stay unknown.
pub fn mission_from_title(title: &str) -> Option<String> {
    let lower = title.to_lowercase();
    MISSION_RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(mission, _)| (*mission).to_string())
}

/// Extract a publication year from the title. Literal years win, then a few
/// well-known mission launch years, else unknown.
pub fn year_from_title(title: &str) -> Option<i32> {
    if let Some(m) = YEAR_RE.find(title) {
        return m.as_str().parse().ok();
    }

    let lower = title.to_lowercase();
    if lower.contains("bion-m") {
        Some(2013)
    } else if lower.contains("inspiration4") {
        Some(2021)
    } else if lower.contains("iss") && lower.contains("space station") {
        Some(2015)
    } else {
        None
    }
}

/// Extract a PMC id from a PubMed Central link.
pub fn pmc_id_from_link(link: &str) -> Option<String> {
    PMC_RE
        .captures(link)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
