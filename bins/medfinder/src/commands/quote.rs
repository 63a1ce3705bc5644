//! Quote command - stock of one medicine at one pharmacy

use crate::context::AppContext;
use anyhow::Result;
use medfinder_cli::output::{format_price, print_json};
use medfinder_inventory::{quote, StockQuote};
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOutput<'a> {
    pharmacy_id: &'a str,
    medicine_id: &'a str,
    #[serde(flatten)]
    stock: StockQuote,
}

/// Print the quote for a (pharmacy, medicine) pair
pub fn run(ctx: &AppContext, pharmacy_id: &str, medicine_id: &str) -> Result<()> {
    let stock = quote(pharmacy_id, medicine_id);

    if ctx.format.is_json() {
        print_json(&QuoteOutput {
            pharmacy_id,
            medicine_id,
            stock,
        })?;
        return Ok(());
    }

    let availability = if stock.in_stock {
        format!("in stock ({} units)", stock.quantity).green().to_string()
    } else {
        "out of stock".red().to_string()
    };
    println!(
        "{} at {}: {}, {}",
        medicine_id.bold(),
        pharmacy_id.bold(),
        availability,
        format_price(stock.price.rupees())
    );
    Ok(())
}
