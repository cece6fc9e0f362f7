//! sbk graph - relationship graph export.

use clap::Args;
use colored::Colorize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Maximum edges to display in human output
    #[arg(long, default_value = "25")]
    pub limit: usize,
}

pub fn run(ctx: &AppContext, args: &GraphArgs) -> Result<()> {
    let view = ctx.engine.graph_view()?;

    if ctx.format.is_json() {
        return output::emit_json(&view);
    }

    println!(
        "{} nodes, {} edges",
        view.nodes.len().to_string().bold(),
        view.edges.len().to_string().bold()
    );
    for edge in view.edges.iter().take(args.limit) {
        println!("  {} -- {}  (shared: {})", edge.a.cyan(), edge.b.cyan(), edge.weight);
    }
    if view.edges.len() > args.limit {
        println!("{}", format!("... {} more edges", view.edges.len() - args.limit).dimmed());
    }
    Ok(())
}
