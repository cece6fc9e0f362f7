//! Command handlers. One file per subcommand; each receives the shared
//! [`AppContext`] with the loaded engine and the output format.

pub mod graph;
pub mod insights;
pub mod list;
pub mod search;
pub mod stats;
pub mod trends;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::corpus;
use crate::engine::KnowledgeEngine;
use crate::error::{Result, SbkError};

/// Shared state for command execution: the engine, loaded and ready,
/// plus presentation choices.
pub struct AppContext {
    pub engine: KnowledgeEngine,
    pub format: OutputFormat,
}

impl AppContext {
    /// Build the context from parsed CLI flags: load config, load the
    /// corpus, build the engine state.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        let engine = KnowledgeEngine::new(config);

        let data = cli.data.as_deref().ok_or_else(|| {
            SbkError::MissingConfig("--data <FILE> (or SBK_DATA) is required".to_string())
        })?;
        let corpus = corpus::load_corpus(data)?;
        engine.load(corpus);

        Ok(Self {
            engine,
            format: cli.output_format(),
        })
    }
}

/// Dispatch a parsed subcommand.
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Trends(args) => trends::run(ctx, args),
        Commands::Insights(args) => insights::run(ctx, args),
        Commands::Graph(args) => graph::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
    }
}
