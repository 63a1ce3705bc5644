//! Search command - pharmacies in range that stock the matching medicines

use crate::context::{coded, AppContext};
use anyhow::Result;
use medfinder_cli::output::{format_count, format_distance, format_price, format_rating, print_json};
use medfinder_cli::Status;
use medfinder_finder::{MedicineAvailability, SearchRequest, StockedPharmacy};
use medfinder_geo::{current_location_label, parse_coordinate};
use medfinder_telemetry::Event;
use owo_colors::OwoColorize;

/// Run a submitted search
pub async fn run(
    ctx: &AppContext,
    query: &str,
    city: Option<String>,
    range_km: Option<f64>,
    near: Option<&str>,
) -> Result<()> {
    let finder = ctx.finder().await?;

    let mut request = SearchRequest::new(query);
    request.city = city;
    request.range_km = range_km;
    if let Some(text) = near {
        request.user_location = Some(parse_coordinate(text).map_err(coded)?);
    }

    let results = finder.search(&request).map_err(coded)?;

    Event::new(
        "search",
        serde_json::json!({
            "query": query,
            "city": request.city,
            "medicines": results.len(),
        }),
    )
    .log();

    if ctx.format.is_json() {
        print_json(&results)?;
        return Ok(());
    }

    let city_id = request
        .city
        .as_deref()
        .unwrap_or(&finder.config().finder.default_city);
    let city_name = finder
        .city(city_id)
        .map_err(coded)?
        .map_or(city_id, |c| c.name);
    let range_km = request
        .range_km
        .unwrap_or(finder.config().finder.default_range_km);

    if results.is_empty() {
        Status::info(&format!(
            "No pharmacies within {} of {} have medicines matching '{}'",
            format_distance(range_km),
            city_name,
            query.trim()
        ));
        return Ok(());
    }

    if let Some(position) = request.user_location {
        println!("{}", current_location_label(&position).dimmed());
    }

    for availability in &results {
        print_availability(availability);
    }

    Ok(())
}

fn print_availability(availability: &MedicineAvailability) {
    let medicine = &availability.medicine;
    Status::header(&format!(
        "{} ({}): in stock at {} of {}",
        medicine.name,
        medicine.category.label(),
        availability.available_at.len(),
        format_count(availability.total_pharmacies, "pharmacy", "pharmacies")
    ));

    for stocked in &availability.available_at {
        print_stocked(stocked);
    }
}

fn print_stocked(stocked: &StockedPharmacy) {
    let pharmacy = &stocked.pharmacy;
    let mut line = format!(
        "  {:>8}  {}  {}  {}",
        format_distance(pharmacy.distance),
        pharmacy.name.bold(),
        format_price(stocked.stock.price.rupees()).green(),
        format!("{} units", stocked.stock.quantity).dimmed()
    );
    if let Some(km) = stocked.distance_from_user {
        line.push_str(&format!("  {}", format!("{} from you", format_distance(km)).cyan()));
    }
    println!("{line}");
    println!(
        "            {}  {}  {}  {}",
        pharmacy.address.dimmed(),
        pharmacy.phone.dimmed(),
        format_rating(pharmacy.rating).yellow(),
        pharmacy.opening_hours.dimmed()
    );
}
