//! sbk search - ranked semantic search with structured filters.

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;
use crate::search::{SearchFilters, SearchHit};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Free-text query. Omit (or pass an empty string) to list the
    /// filtered corpus in insertion order.
    pub query: Option<String>,

    /// Accept only these categories (repeatable)
    #[arg(long)]
    pub category: Vec<String>,

    /// Accept only these organisms (repeatable)
    #[arg(long)]
    pub organism: Vec<String>,

    /// Accept only these missions (repeatable)
    #[arg(long)]
    pub mission: Vec<String>,

    /// Accept publications carrying any of these tags (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,

    /// Accept only these publication years (repeatable)
    #[arg(long)]
    pub year: Vec<i32>,

    /// Extra filter as field=value; field names are validated against the
    /// schema (repeatable)
    #[arg(long, value_name = "FIELD=VALUE")]
    pub filter: Vec<String>,

    /// Maximum number of results (default from config)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    hits: &'a [SearchHit],
    total_candidates: usize,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let filters = build_filters(args)?;
    let query = args.query.as_deref().unwrap_or("");
    let limit = args
        .limit
        .unwrap_or(ctx.engine.config().search.default_limit);

    let result = ctx.engine.search(query, &filters, Some(limit))?;

    if ctx.format.is_json() {
        return output::emit_json(&SearchReport {
            query,
            hits: &result.hits,
            total_candidates: result.total_candidates,
        });
    }

    if result.hits.is_empty() {
        println!("{}", "no matching publications".dimmed());
        return Ok(());
    }

    for hit in &result.hits {
        let title = ctx
            .engine
            .publication(&hit.id)?
            .map(|p| p.title)
            .unwrap_or_default();
        println!(
            "{:>6.3}  {}  {}",
            hit.score,
            hit.id.cyan(),
            title
        );
    }
    println!(
        "{}",
        format!(
            "{} of {} candidates",
            result.hits.len(),
            result.total_candidates
        )
        .dimmed()
    );
    Ok(())
}

fn build_filters(args: &SearchArgs) -> Result<SearchFilters> {
    let mut filters = SearchFilters::new();
    for value in &args.category {
        filters.insert("category", value)?;
    }
    for value in &args.organism {
        filters.insert("organism", value)?;
    }
    for value in &args.mission {
        filters.insert("mission", value)?;
    }
    for value in &args.tag {
        filters.insert("tag", value)?;
    }
    for year in &args.year {
        filters.insert("year", &year.to_string())?;
    }
    for pair in &args.filter {
        let (field, value) = pair.split_once('=').unwrap_or((pair.as_str(), ""));
        filters.insert(field, value)?;
    }
    Ok(filters)
}
