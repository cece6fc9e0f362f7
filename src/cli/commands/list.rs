//! sbk list - page through publications in corpus order.

use clap::Args;
use colored::Colorize;

use crate::cli::commands::AppContext;
use crate::cli::output;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Skip this many publications
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum publications to return
    #[arg(long, short = 'n', default_value = "100")]
    pub limit: usize,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let page = ctx.engine.publications(args.offset, args.limit)?;

    if ctx.format.is_json() {
        return output::emit_json(&page);
    }

    for publication in &page.publications {
        let year = publication
            .year
            .map_or_else(|| "????".to_string(), |y| y.to_string());
        println!(
            "{}  {}  [{}]  {}",
            publication.id.cyan(),
            year.dimmed(),
            publication.category,
            publication.title
        );
    }
    println!(
        "{}",
        format!(
            "{}-{} of {}",
            args.offset,
            args.offset + page.publications.len(),
            page.total
        )
        .dimmed()
    );
    Ok(())
}
