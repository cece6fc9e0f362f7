//! CLI module - command-line interface definitions and handlers.
//!
//! Uses clap v4 with derive macros for argument parsing. Each subcommand
//! maps onto one engine operation; wire-level serialization stops here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use commands::AppContext;
pub use output::OutputFormat;

/// Space biology knowledge engine - search, trends, and relationship graphs
/// over publication corpora.
#[derive(Parser, Debug)]
#[command(name = "sbk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the corpus JSON file
    #[arg(long, global = true, env = "SBK_DATA", value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Config file path (default: $SBK_CONFIG if set)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (human, json)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective output format; defaults to human.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Human)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ranked semantic search with optional structured filters
    Search(commands::search::SearchArgs),
    /// Publication counts grouped by year, category, and organism
    Trends(commands::trends::TrendsArgs),
    /// Heuristic pattern statements derived from the corpus
    Insights(commands::insights::InsightsArgs),
    /// The shared-tag relationship graph
    Graph(commands::graph::GraphArgs),
    /// Corpus statistics
    Stats(commands::stats::StatsArgs),
    /// List publications in corpus order
    List(commands::list::ListArgs),
}
