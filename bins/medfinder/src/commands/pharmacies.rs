//! Pharmacies command - the generated pharmacy set around a city center

use crate::context::{coded, AppContext};
use anyhow::Result;
use medfinder_cli::output::{format_count, format_distance, format_rating, print_json};
use medfinder_cli::Status;
use owo_colors::OwoColorize;

/// List pharmacies within range, in generation order
pub fn run(ctx: &AppContext, city: Option<&str>, range_km: Option<f64>) -> Result<()> {
    let finder = ctx.pharmacy_finder();
    let pharmacies = finder.pharmacies(city, range_km).map_err(coded)?;

    if ctx.format.is_json() {
        print_json(&pharmacies)?;
        return Ok(());
    }

    let settings = &finder.config().finder;
    let range_km = range_km.unwrap_or(settings.default_range_km);
    let city_id = city.unwrap_or(&settings.default_city);
    let city_name = finder.city(city_id).map_err(coded)?.map_or(city_id, |c| c.name);

    Status::header(&format!(
        "{} within {} of {}",
        format_count(pharmacies.len(), "pharmacy", "pharmacies"),
        format_distance(range_km),
        city_name
    ));

    for pharmacy in &pharmacies {
        let mut tags = Vec::new();
        if pharmacy.is_24_hours {
            tags.push("24h");
        }
        if pharmacy.has_parking {
            tags.push("parking");
        }
        println!(
            "  {:>8}  {:<22} {}  {}  {}",
            format_distance(pharmacy.distance),
            pharmacy.id.dimmed(),
            pharmacy.name.bold(),
            format_rating(pharmacy.rating).yellow(),
            tags.join(" ").cyan()
        );
        println!("            {}  {}", pharmacy.address.dimmed(), pharmacy.phone.dimmed());
    }

    Ok(())
}
