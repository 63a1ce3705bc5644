//! medfinder - find medicines at nearby pharmacies
//!
//! Live suggestions, availability search, the pharmacy directory and the
//! pharmacy owner's inventory tools from one command line.

use clap::{ArgAction, Parser, Subcommand};
use medfinder_cli::{OutputFormat, Status};
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod context;

use commands::{browse, cities, directions, inventory, pharmacies, quote, search, suggest};
use context::AppContext;

/// Find medicines at nearby pharmacies
#[derive(Parser)]
#[command(name = "medfinder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (default: medfinder.toml in the usual places)
    #[arg(long, global = true, env = "MEDFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Read the medicine catalog from a JSON file instead of the backend
    #[arg(long, global = true, env = "MEDFINDER_CATALOG")]
    catalog: Option<PathBuf>,

    /// Use the bundled sample catalog
    #[arg(long, global = true, conflicts_with = "catalog")]
    offline: bool,

    /// Pin pharmacy generation to a seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest medicines for a partial name
    Suggest {
        /// What has been typed so far
        query: String,

        /// Maximum suggestions (default from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// List medicines in a category, or the categories
    Browse {
        /// Category tag, e.g. fever
        category: Option<String>,
    },

    /// Find pharmacies that stock a medicine
    Search {
        /// Medicine name, brand, or category
        query: String,

        /// City id, e.g. mumbai
        #[arg(short, long)]
        city: Option<String>,

        /// Search radius in km
        #[arg(short, long)]
        range: Option<f64>,

        /// Your position as `latitude,longitude`
        #[arg(long, allow_hyphen_values = true)]
        near: Option<String>,
    },

    /// List pharmacies within range of a city center
    Pharmacies {
        /// City id, e.g. mumbai
        #[arg(short, long)]
        city: Option<String>,

        /// Search radius in km
        #[arg(short, long)]
        range: Option<f64>,
    },

    /// Show the stock quote for one pharmacy and medicine
    Quote {
        /// Pharmacy id, e.g. mumbai-pharmacy-1
        pharmacy_id: String,

        /// Medicine id
        medicine_id: String,
    },

    /// List supported cities
    Cities,

    /// Print a directions link to a pharmacy or position
    Directions {
        /// Pharmacy id, e.g. pune-pharmacy-3
        #[arg(required_unless_present = "to")]
        pharmacy_id: Option<String>,

        /// Destination as `latitude,longitude`
        #[arg(long, conflicts_with = "pharmacy_id", allow_hyphen_values = true)]
        to: Option<String>,
    },

    /// Manage a pharmacy's inventory on the backend
    Inventory {
        #[command(flatten)]
        owner: inventory::Owner,

        #[command(subcommand)]
        action: inventory::Action,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let ctx = match AppContext::load(
        cli.config.as_deref(),
        cli.catalog.clone(),
        cli.offline,
        cli.seed,
        cli.format,
    ) {
        Ok(ctx) => ctx,
        Err(e) => return fail(&e),
    };

    let _telemetry = match medfinder_telemetry::init_with_config(ctx.telemetry_config(cli.verbose)) {
        Ok(guard) => Some(guard),
        Err(e) => {
            Status::warning(&format!("Logging disabled: {e}"));
            None
        }
    };

    let result = match cli.command {
        Commands::Suggest { query, limit } => suggest::run(&ctx, &query, limit).await,

        Commands::Browse { category } => browse::run(&ctx, category.as_deref()).await,

        Commands::Search { query, city, range, near } => {
            search::run(&ctx, &query, city, range, near.as_deref()).await
        }

        Commands::Pharmacies { city, range } => pharmacies::run(&ctx, city.as_deref(), range),

        Commands::Quote { pharmacy_id, medicine_id } => quote::run(&ctx, &pharmacy_id, &medicine_id),

        Commands::Cities => cities::run(&ctx),

        Commands::Directions { pharmacy_id, to } => {
            directions::run(&ctx, pharmacy_id.as_deref(), to.as_deref())
        }

        Commands::Inventory { owner, action } => inventory::run(&ctx, &owner, action).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn fail(error: &anyhow::Error) -> ExitCode {
    if let Some(coded) = error.downcast_ref::<medfinder_core::Error>() {
        Status::report(coded);
        return ExitCode::from(u8::try_from(coded.exit_code()).unwrap_or(1));
    }
    eprintln!("{} {:#}", "Error:".red().bold(), error);
    ExitCode::FAILURE
}
