//! Supabase REST client for medfinder
//!
//! Typed access to the three tables the tools use: the medicine catalog,
//! registered pharmacies and per-pharmacy inventory.
//!
//! # Features
//!
//! - **Environment-based configuration**: project URL and keys from environment variables
//! - **Retry with exponential backoff**: automatic retry for transient failures
//! - **Circuit breaker**: stop calling a backend that keeps failing
//! - **Request correlation**: every request carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use medfinder_api_client::MedfinderClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MedfinderClient::new()?;
//!
//!     let load = client.medicines().load_catalog_or_empty().await;
//!     if let Some(notice) = load.notice {
//!         eprintln!("{notice}");
//!     }
//!     println!("{} medicines", load.catalog.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;

pub use client::{MedfinderClient, Prefer};
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::MedfinderClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{CatalogLoad, InventoryApi, MedicinesApi, PharmaciesApi, Pharmacy};
    pub use crate::error::{ApiError, ApiResult};
}
