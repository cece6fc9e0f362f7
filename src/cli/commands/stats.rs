//! sbk stats - corpus statistics.

use clap::Args;
use colored::Colorize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

pub fn run(ctx: &AppContext, _args: &StatsArgs) -> Result<()> {
    let stats = ctx.engine.stats()?;

    if ctx.format.is_json() {
        return output::emit_json(&stats);
    }

    println!("{:<22} {}", "Publications".bold(), stats.total_publications);
    println!("{:<22} {}", "Categories".bold(), stats.category_counts.len());
    match stats.year_range {
        Some((lo, hi)) => println!("{:<22} {lo}-{hi}", "Year range".bold()),
        None => println!("{:<22} {}", "Year range".bold(), "unknown".dimmed()),
    }
    println!("{:<22} {}", "Graph nodes".bold(), stats.graph_nodes);
    println!("{:<22} {}", "Graph edges".bold(), stats.graph_edges);
    Ok(())
}
