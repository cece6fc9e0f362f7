pub mod cli;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod graph;
pub mod index;
pub mod search;
pub mod text;
pub mod trends;

pub use error::{Result, SbkError};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
