//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface over one PostgREST table.
//!
//! | Module | Table | Description |
//! |--------|-------|-------------|
//! | `medicines` | `medicines` | Read-only medicine catalog |
//! | `pharmacies` | `pharmacies` | Registered pharmacies and their owners |
//! | `inventory` | `pharmacy_inventory` | Per-pharmacy stock rows |

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub mod inventory;
pub mod medicines;
pub mod pharmacies;

pub use inventory::InventoryApi;
pub use medicines::{CatalogLoad, MedicinesApi};
pub use pharmacies::{NewPharmacy, Pharmacy, PharmaciesApi};

/// PostgREST equality filter with `value` percent-encoded, e.g. `id=eq.i-42`
pub(crate) fn eq_filter(column: &str, value: &str) -> String {
    format!("{column}=eq.{}", utf8_percent_encode(value, NON_ALPHANUMERIC))
}
