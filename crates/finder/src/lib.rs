//! Medicine availability search for medfinder.
//!
//! A [`Finder`] owns one session: the medicine catalog, the configuration and
//! the pharmacy set generated for each city visited. Suggestions come from
//! the tiered matcher; a submitted search joins the matching medicines with
//! the in-range pharmacies that stock them.
//!
//! ```
//! use medfinder_core::config::ConfigSchema;
//! use medfinder_finder::{bundled_catalog, Finder};
//!
//! let finder = Finder::new(bundled_catalog().unwrap(), ConfigSchema::default());
//! let names: Vec<_> = finder.suggest("para").iter().map(|m| m.name.as_str()).collect();
//! assert_eq!(names[0], "Paracetamol");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod compose;
mod directory;
mod error;
mod finder;

pub use compose::{compose, stock_for, MedicineAvailability, StockedPharmacy};
pub use directory::PharmacyDirectory;
pub use error::{FinderError, Result};
pub use finder::{Finder, SearchRequest};

use medfinder_search::Catalog;

const BUNDLED_CATALOG: &str = include_str!("../data/medicines.json");

/// The sample catalog shipped with the crate, for offline use.
///
/// # Errors
///
/// Only if the bundled data is malformed.
pub fn bundled_catalog() -> Result<Catalog> {
    Ok(Catalog::from_json(BUNDLED_CATALOG)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let catalog = bundled_catalog().unwrap();
        assert_eq!(catalog.len(), 24);
        assert_eq!(catalog.by_id("m1").unwrap().aliases[0], "Crocin");
    }
}
