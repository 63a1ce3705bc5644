//! Directions command - map hand-off link

use crate::context::{coded, AppContext};
use anyhow::Result;
use medfinder_cli::output::print_json;
use medfinder_core::Error;
use medfinder_geo::{directions_url, parse_coordinate};

/// Print a directions URL to a pharmacy id or a `lat,lng` destination
pub fn run(ctx: &AppContext, pharmacy_id: Option<&str>, to: Option<&str>) -> Result<()> {
    let (label, url) = match (pharmacy_id, to) {
        (_, Some(text)) => {
            let destination = parse_coordinate(text).map_err(coded)?;
            (text.trim().to_string(), directions_url(&destination))
        }
        (Some(id), None) => {
            let finder = ctx.pharmacy_finder();
            let pharmacy = finder
                .directory()
                .pharmacy(id)
                .ok_or_else(|| coded(Error::pharmacy_not_found(id)))?;
            (pharmacy.name.clone(), pharmacy.directions_url())
        }
        (None, None) => anyhow::bail!("Pass a pharmacy id or --to <latitude,longitude>"),
    };

    if ctx.format.is_json() {
        print_json(&serde_json::json!({ "destination": label, "url": url }))?;
    } else {
        println!("{url}");
    }
    Ok(())
}
