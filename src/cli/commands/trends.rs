//! sbk trends - grouped publication counts.

use clap::Args;
use colored::Colorize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct TrendsArgs {}

pub fn run(ctx: &AppContext, _args: &TrendsArgs) -> Result<()> {
    let report = ctx.engine.trends()?;

    if ctx.format.is_json() {
        return output::emit_json(&report);
    }

    println!("{}", "Publications by year".bold());
    for (year, count) in &report.by_year {
        println!("  {year}  {}", bar(*count));
    }

    println!("\n{}", "Publications by category".bold());
    for (category, count) in &report.by_category {
        println!("  {category:<16} {}", bar(*count));
    }

    if !report.by_organism.is_empty() {
        println!("\n{}", "Publications by organism".bold());
        for (organism, count) in &report.by_organism {
            println!("  {organism:<28} {}", bar(*count));
        }
    }
    Ok(())
}

fn bar(count: usize) -> String {
    format!("{} {count}", "#".repeat(count.min(60)).green())
}
