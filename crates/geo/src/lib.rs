//! Location utilities for medfinder.
//!
//! This crate provides:
//! - The supported city directory with per-city pharmacy templates
//! - Pharmacy generation with an injectable random source
//! - Range filtering over a generated pharmacy set
//! - Haversine distance and the map directions hand-off
//!
//! # Example
//!
//! ```
//! use medfinder_geo::{find_city, within_range, PharmacyGenerator};
//!
//! let generator = PharmacyGenerator::seeded(7);
//! let pharmacies = generator.generate(find_city("pune").unwrap());
//! let near = within_range(&pharmacies, 5.0);
//!
//! assert_eq!(pharmacies.len(), 12);
//! assert!(near.iter().all(|p| p.distance <= 5.0));
//! ```

mod cities;
mod directions;
mod error;
mod haversine;
mod pharmacies;

pub use cities::{find_city, resolve_city, City, PharmacyTemplate, CITIES, DEFAULT_CITY_ID};
pub use directions::{current_location_label, directions_url, parse_coordinate};
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{haversine_distance, EARTH_RADIUS_KM};
pub use pharmacies::{
    generate_pharmacies, pharmacies_in_range, validate_range, within_range, PharmacyGenerator,
    PharmacyLocation, DAYTIME_HOURS, OPEN_24_HOURS,
};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if both values are within range. NaN is never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
