//! Suggest command - live medicine suggestions for a partial name

use crate::context::AppContext;
use anyhow::Result;
use medfinder_cli::output::print_json;
use medfinder_cli::Status;
use medfinder_search::suggest_scored;
use owo_colors::OwoColorize;

/// Show ranked suggestions for `query`
pub async fn run(ctx: &AppContext, query: &str, limit: Option<usize>) -> Result<()> {
    let finder = ctx.finder().await?;
    let limit = limit.unwrap_or(finder.config().search.max_suggestions);
    let results = suggest_scored(query, finder.catalog(), limit);

    if ctx.format.is_json() {
        print_json(&results)?;
        return Ok(());
    }

    if results.is_empty() {
        if query.trim().is_empty() {
            Status::info("Type part of a medicine name to see suggestions");
        } else {
            Status::info(&format!("No medicines match '{}'", query.trim()));
        }
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        let medicine = result.medicine;
        println!(
            "{:>2}. {}  {}  {}",
            i + 1,
            medicine.name.bold(),
            medicine.category.label().dimmed(),
            format!("{} {:.0}", result.match_type, result.score).cyan()
        );
        if !medicine.aliases.is_empty() {
            println!("    {}", medicine.aliases.join(", ").dimmed());
        }
    }

    Ok(())
}
