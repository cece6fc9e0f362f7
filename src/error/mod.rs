//! Error handling for sbk.
//!
//! Provides [`SbkError`], the main error enum for all engine operations,
//! and the crate-wide [`Result`] alias.
//!
//! Degenerate-but-valid outcomes (empty corpus, empty query, no filter
//! matches, unknown query terms) are *not* errors; they produce well-defined
//! empty or zero-score results from the engine instead.

use std::io;

use thiserror::Error;

/// Main error type for sbk operations.
#[derive(Error, Debug)]
pub enum SbkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Corpus load failed: {0}")]
    CorpusLoad(String),

    #[error("Duplicate publication id: {0}")]
    DuplicateId(String),

    /// A filter referenced a field the schema does not recognize.
    /// Surfaced to the caller, never silently ignored.
    #[error("Unknown filter field: {field} (expected one of {expected})")]
    InvalidFilterField { field: String, expected: String },

    #[error("Invalid value for filter field {field}: {value}")]
    InvalidFilterValue { field: String, value: String },

    /// A query was issued before the initial corpus load completed.
    /// The caller decides whether to queue or reject; the engine never
    /// retries internally.
    #[error("Index not ready: no corpus has been loaded")]
    IndexNotReady,
}

/// Result type alias using SbkError.
pub type Result<T> = std::result::Result<T, SbkError>;
