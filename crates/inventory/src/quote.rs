//! Deterministic stock quotes.
//!
//! A quote is a pure function of the (pharmacy, medicine) id pair, so the
//! same pair always shows the same stock, quantity and price without any
//! stored state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 32-bit string hash over UTF-16 code units: `h = h * 31 + unit`, wrapping.
pub fn string_hash(text: &str) -> i32 {
    text.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Price in rupees, shown with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Wrap a rupee amount.
    pub fn new(rupees: f64) -> Self {
        Self(rupees)
    }

    /// Rupee amount.
    pub fn rupees(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Availability of one medicine at one pharmacy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    /// Whether the pharmacy has it
    pub in_stock: bool,
    /// Units on hand; always 0 when out of stock
    pub quantity: u32,
    /// Unit price
    pub price: Price,
}

/// Quote for `medicine_id` at `pharmacy_id`.
///
/// ```
/// use medfinder_inventory::quote;
///
/// let a = quote("mumbai-pharmacy-1", "m1");
/// let b = quote("mumbai-pharmacy-1", "m1");
/// assert_eq!(a, b);
/// ```
pub fn quote(pharmacy_id: &str, medicine_id: &str) -> StockQuote {
    let h = string_hash(&format!("{pharmacy_id}{medicine_id}"));

    let in_stock = (h % 100).unsigned_abs() > 15;
    let quantity = if in_stock { (h % 50).unsigned_abs() + 5 } else { 0 };
    let price = Price::new(f64::from((h % 200).unsigned_abs() + 50));

    StockQuote {
        in_stock,
        quantity,
        price,
    }
}
