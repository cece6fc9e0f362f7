//! sbk insights - heuristic pattern statements.

use clap::Args;
use colored::Colorize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;
use crate::trends::InsightKind;

#[derive(Args, Debug, Default)]
pub struct InsightsArgs {}

pub fn run(ctx: &AppContext, _args: &InsightsArgs) -> Result<()> {
    let insights = ctx.engine.insights()?;

    if ctx.format.is_json() {
        return output::emit_json(&insights);
    }

    if insights.is_empty() {
        println!("{}", "no insights derived from this corpus".dimmed());
        return Ok(());
    }

    for insight in &insights {
        let label = match insight.kind {
            InsightKind::RisingCategory => "RISING".green(),
            InsightKind::FallingCategory => "FALLING".red(),
            InsightKind::SparseCombination => "SPARSE".yellow(),
            InsightKind::TopTerm => "TOP TERM".cyan(),
        };
        println!(
            "{label:>10}  {}  {} ({:.2})",
            insight.subject.bold(),
            insight.detail,
            insight.metric
        );
    }
    Ok(())
}
