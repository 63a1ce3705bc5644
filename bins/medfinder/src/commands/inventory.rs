//! Inventory command - a pharmacy owner's stock on the backend
//!
//! Every change is checked against the loaded rows first, so rule
//! violations never reach the backend.

use crate::context::{coded, AppContext};
use anyhow::Result;
use clap::{Args, Subcommand};
use medfinder_api_client::MedfinderClient;
use medfinder_cli::output::{format_count, print_json, truncate};
use medfinder_cli::progress::{finish_error, finish_success, spinner};
use medfinder_cli::Status;
use medfinder_core::{Error, ErrorCode};
use medfinder_inventory::{checked_quantity, CategoryFilter, InventoryBook, InventoryItem};
use owo_colors::OwoColorize;

/// Whose inventory to work on
#[derive(Args, Debug, Clone)]
pub struct Owner {
    /// Pharmacy id
    #[arg(long, env = "MEDFINDER_PHARMACY_ID")]
    pub pharmacy: Option<String>,

    /// Look the pharmacy up by its owner's user id
    #[arg(long, env = "MEDFINDER_USER_ID")]
    pub user: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Action {
    /// List inventory rows
    List {
        /// Only medicines whose name contains this
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category tag, or `all`
        #[arg(short, long, default_value = "all")]
        category: String,
    },

    /// Catalog medicines not stocked yet
    Addable {
        /// Only medicines whose name contains this
        #[arg(short, long, default_value = "")]
        search: String,

        /// Category tag, or `all`
        #[arg(short, long, default_value = "all")]
        category: String,
    },

    /// Start stocking a medicine (in stock, 10 units)
    Add {
        /// Catalog medicine id
        medicine_id: String,
    },

    /// Flip a row between in stock and out of stock
    Toggle {
        /// Inventory row id
        item_id: String,
    },

    /// Set a row's quantity
    SetQuantity {
        /// Inventory row id
        item_id: String,

        /// New quantity, zero or more
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Stop stocking a medicine
    Remove {
        /// Inventory row id
        item_id: String,
    },

    /// Summary counts
    Stats,
}

/// Run an inventory action
pub async fn run(ctx: &AppContext, owner: &Owner, action: Action) -> Result<()> {
    // Input rules that need no backend
    if let Action::SetQuantity { quantity, .. } = &action {
        checked_quantity(*quantity).map_err(coded)?;
    }

    let client = ctx.client()?;
    let pharmacy_id = resolve_pharmacy(&client, owner).await?;
    let mut book = load_book(&client, &pharmacy_id).await?;

    match action {
        Action::List { search, category } => {
            let filter = CategoryFilter::from(category.as_str());
            let items = book.filter(search.trim(), &filter);
            if ctx.format.is_json() {
                print_json(&items)?;
            } else {
                print_items(&items);
                let stats = book.stats();
                println!();
                println!(
                    "{} in stock, {} out of stock, {} units",
                    stats.in_stock.green(),
                    stats.out_of_stock.red(),
                    stats.units
                );
            }
        }

        Action::Addable { search, category } => {
            let catalog = client.medicines().catalog().await.map_err(coded)?;
            let filter = CategoryFilter::from(category.as_str());
            let medicines = book.addable(&catalog, search.trim(), &filter);
            if ctx.format.is_json() {
                print_json(&medicines)?;
            } else if medicines.is_empty() {
                Status::info("Every matching medicine is already stocked");
            } else {
                Status::header(&format_count(medicines.len(), "medicine to add", "medicines to add"));
                for medicine in medicines {
                    println!("  {:<8} {}  {}", medicine.id.dimmed(), medicine.name, medicine.category.label().dimmed());
                }
            }
        }

        Action::Add { medicine_id } => {
            let catalog = client.medicines().catalog().await.map_err(coded)?;
            if catalog.by_id(&medicine_id).is_none() {
                return Err(coded(Error::medicine_not_found(&medicine_id)));
            }

            let new_item = book.prepare_add(&medicine_id).map_err(coded)?;
            let row = client.inventory().add(&new_item).await.map_err(coded)?;
            tracing::info!(pharmacy = %pharmacy_id, item = %row.id, medicine = %medicine_id, "Medicine added");
            book.insert(row.clone()).map_err(coded)?;

            report_row(ctx, &row, &format!("Added {}", row.display_name()))?;
        }

        Action::Toggle { item_id } => {
            let in_stock = book.toggle_stock(&item_id).map_err(coded)?;
            client
                .inventory()
                .set_in_stock(&item_id, in_stock)
                .await
                .map_err(coded)?;

            let row = changed_row(&book, &item_id)?;
            let state = if in_stock { "in stock" } else { "out of stock" };
            report_row(ctx, row, &format!("{} is now {state}", row.display_name()))?;
        }

        Action::SetQuantity { item_id, quantity } => {
            let quantity = book.set_quantity(&item_id, quantity).map_err(coded)?;
            client
                .inventory()
                .set_quantity(&item_id, quantity)
                .await
                .map_err(coded)?;

            let row = changed_row(&book, &item_id)?;
            report_row(ctx, row, &format!("{} quantity set to {quantity}", row.display_name()))?;
        }

        Action::Remove { item_id } => {
            let removed = book.remove(&item_id).map_err(coded)?;
            client.inventory().remove(&item_id).await.map_err(coded)?;
            tracing::info!(pharmacy = %pharmacy_id, item = %item_id, "Medicine removed");

            report_row(ctx, &removed, &format!("Removed {}", removed.display_name()))?;
        }

        Action::Stats => {
            let stats = book.stats();
            if ctx.format.is_json() {
                print_json(&stats)?;
            } else {
                Status::header(&format!("Inventory of {pharmacy_id}"));
                println!("  Medicines:     {}", stats.total);
                println!("  In stock:      {}", stats.in_stock.green());
                println!("  Out of stock:  {}", stats.out_of_stock.red());
                println!("  Units:         {}", stats.units);
            }
        }
    }

    Ok(())
}

async fn resolve_pharmacy(client: &MedfinderClient, owner: &Owner) -> Result<String> {
    if let Some(id) = &owner.pharmacy {
        return Ok(id.clone());
    }

    let Some(user_id) = &owner.user else {
        return Err(coded(
            Error::new(ErrorCode::ConfigError, "No pharmacy selected")
                .with_suggestion("Pass --pharmacy <id> or --user <owner id>"),
        ));
    };

    let pharmacy = client.pharmacies().by_owner(user_id).await.map_err(coded)?;
    tracing::debug!(user = %user_id, pharmacy = %pharmacy.id, "Resolved pharmacy from owner");
    Ok(pharmacy.id)
}

async fn load_book(client: &MedfinderClient, pharmacy_id: &str) -> Result<InventoryBook> {
    let pb = spinner("Loading inventory...");
    match client.inventory().book(pharmacy_id).await {
        Ok(book) => {
            finish_success(&pb, &format_count(book.items().len(), "row", "rows"));
            Ok(book)
        }
        Err(e) => {
            finish_error(&pb, "Could not load inventory");
            Err(coded(e))
        }
    }
}

fn changed_row<'a>(book: &'a InventoryBook, item_id: &str) -> Result<&'a InventoryItem> {
    book.get(item_id)
        .ok_or_else(|| coded(Error::new(ErrorCode::InventoryItemNotFound, format!("Inventory item not found: {item_id}"))))
}

fn report_row(ctx: &AppContext, row: &InventoryItem, message: &str) -> Result<()> {
    if ctx.format.is_json() {
        print_json(row)?;
    } else {
        Status::success(message);
    }
    Ok(())
}

fn print_items(items: &[&InventoryItem]) {
    if items.is_empty() {
        Status::info("No inventory rows match");
        return;
    }

    for item in items {
        let category = item
            .medicine
            .as_ref()
            .map_or("", |m| m.category.label());
        let stock = if item.in_stock {
            "in stock".green().to_string()
        } else {
            "out of stock".red().to_string()
        };
        println!(
            "  {:<28} {:<16} {:<14} {:>5}  {}",
            truncate(item.display_name(), 28),
            category.dimmed(),
            stock,
            item.quantity,
            item.id.dimmed()
        );
    }
}
