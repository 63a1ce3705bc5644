//! Stock and inventory for medfinder.
//!
//! Two halves:
//! - [`quote`]: a deterministic stock quote for any (pharmacy, medicine) pair,
//!   used when no real inventory is available
//! - [`InventoryBook`]: a pharmacy's real inventory rows and the rules for
//!   adding, toggling, re-counting and removing them

mod error;
mod quote;
mod stock;

pub use error::{InventoryError, Result};
pub use quote::{quote, string_hash, Price, StockQuote};
pub use stock::{
    checked_quantity, CategoryFilter, InventoryBook, InventoryItem, InventoryStats,
    NewInventoryItem, DEFAULT_IN_STOCK, DEFAULT_QUANTITY,
};
