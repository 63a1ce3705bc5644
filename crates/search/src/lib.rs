//! Medicine search for medfinder.
//!
//! This crate provides:
//! - The medicine catalog model
//! - A tiered matcher (exact, alias, prefix, substring, subsequence)
//! - Suggestion ranking with a bounded, stable result list
//! - The looser substring filter used when a search is submitted
//!
//! ```rust
//! use medfinder_search::{suggest_scored, Catalog, MatchType, MedicineRecord};
//!
//! let catalog = Catalog::new([MedicineRecord::new("m1", "Paracetamol", "fever", ["Crocin"])]);
//! let hits = suggest_scored("crocin", &catalog, 8);
//! assert_eq!(hits[0].match_type, MatchType::AliasExact);
//! ```

mod catalog;
mod error;
pub mod fuzzy;
mod matcher;
mod suggest;

#[cfg(feature = "wasm")]
mod wasm;

pub use catalog::{Catalog, Category, MedicineRecord};
pub use error::{Result, SearchError};
pub use matcher::{match_medicine, normalize_query, MatchResult, MatchScore, MatchType};
pub use suggest::{
    filter_loose, filter_tiered, loose_match, suggest, suggest_scored, DEFAULT_SUGGESTION_LIMIT,
};
