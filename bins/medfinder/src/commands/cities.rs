//! Cities command - supported cities and radius choices

use crate::context::AppContext;
use anyhow::Result;
use medfinder_cli::output::{format_distance, print_json};
use medfinder_cli::Status;
use medfinder_geo::CITIES;
use owo_colors::OwoColorize;

/// List the supported cities
pub fn run(ctx: &AppContext) -> Result<()> {
    if ctx.format.is_json() {
        print_json(&CITIES)?;
        return Ok(());
    }

    let settings = &ctx.config.schema.finder;

    Status::header("Cities");
    for city in &CITIES {
        let marker = if city.id.eq_ignore_ascii_case(&settings.default_city) { "*" } else { " " };
        println!(
            "{} {:<10} {:<10} {:<14} {}",
            marker.green(),
            city.id.cyan(),
            city.name,
            city.state.dimmed(),
            format!("{:.4}, {:.4}", city.center.latitude, city.center.longitude).dimmed()
        );
    }

    let ranges: Vec<String> = settings.range_options.iter().map(|r| format!("{r}")).collect();
    println!();
    println!(
        "Default range {}; choices {} km",
        format_distance(settings.default_range_km),
        ranges.join(", ")
    );
    Ok(())
}
