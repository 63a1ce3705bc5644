//! Pharmacy generation and range filtering.
//!
//! Pharmacies are synthesized from a city's templates plus random
//! perturbation of distance, rating and position. The random source is
//! injected so callers can pin it with a seed.

use crate::cities::{resolve_city, City};
use crate::directions::directions_url;
use crate::error::{GeoError, Result};
use crate::{haversine_distance, Coordinate};
use medfinder_core::config::UnknownCityPolicy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

/// Opening hours shown for round-the-clock stores.
pub const OPEN_24_HOURS: &str = "Open 24 Hours";

/// Opening hours shown for every other store.
pub const DAYTIME_HOURS: &str = "8:00 AM - 10:00 PM";

/// A pharmacy near a city center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyLocation {
    /// `{city}-pharmacy-{n}`, n starting at 1
    pub id: String,
    /// Store name
    pub name: String,
    /// `{area}, {city name}`
    pub address: String,
    /// City display name
    pub city: String,
    /// Contact number
    pub phone: String,
    /// Distance from the city center in km, one decimal
    pub distance: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Rating out of 5, one decimal
    pub rating: f64,
    /// Opening hours label
    pub opening_hours: String,
    /// Parking available
    pub has_parking: bool,
    /// Open around the clock
    #[serde(rename = "is24Hours")]
    pub is_24_hours: bool,
}

impl PharmacyLocation {
    /// Position of the store.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Great-circle distance in km from `origin` to the store.
    pub fn distance_from(&self, origin: &Coordinate) -> f64 {
        haversine_distance(origin, &self.coordinate())
    }

    /// Map hand-off URL with this store as destination.
    pub fn directions_url(&self) -> String {
        directions_url(&self.coordinate())
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generate the full pharmacy set for `city`.
///
/// Random draws per template are taken in a fixed order (distance, rating,
/// latitude, longitude, parking) so a seeded generator always yields the
/// same set.
#[allow(clippy::cast_precision_loss)]
pub fn generate_pharmacies<R: Rng + ?Sized>(city: &City, rng: &mut R) -> Vec<PharmacyLocation> {
    city.templates
        .iter()
        .enumerate()
        .map(|(index, template)| {
            let i = index as f64;
            let distance = round1(0.3 + i * 0.8 + rng.random::<f64>() * 0.5);
            let rating = round1(3.5 + rng.random::<f64>() * 1.5);
            let latitude = city.center.latitude + (rng.random::<f64>() - 0.5) * 0.1;
            let longitude = city.center.longitude + (rng.random::<f64>() - 0.5) * 0.1;
            let has_parking = rng.random::<f64>() > 0.3;
            let is_24_hours = index % 4 == 0;

            PharmacyLocation {
                id: format!("{}-pharmacy-{}", city.id, index + 1),
                name: template.name.to_string(),
                address: format!("{}, {}", template.area, city.name),
                city: city.name.to_string(),
                phone: template.phone.to_string(),
                distance,
                latitude,
                longitude,
                rating,
                opening_hours: if is_24_hours { OPEN_24_HOURS } else { DAYTIME_HOURS }.to_string(),
                has_parking,
                is_24_hours,
            }
        })
        .collect()
}

/// Keep the pharmacies whose distance is at most `range_km`, in input order.
pub fn within_range(pharmacies: &[PharmacyLocation], range_km: f64) -> Vec<PharmacyLocation> {
    pharmacies
        .iter()
        .filter(|p| p.distance <= range_km)
        .cloned()
        .collect()
}

/// Check a search radius.
///
/// # Errors
///
/// [`GeoError::InvalidRange`] for NaN, infinite or non-positive values.
pub fn validate_range(range_km: f64) -> Result<f64> {
    if range_km.is_finite() && range_km > 0.0 {
        Ok(range_km)
    } else {
        Err(GeoError::InvalidRange(range_km))
    }
}

/// Generate a city's pharmacies and keep those within `range_km`.
///
/// The set is freshly generated on every call; cache it when repeated calls
/// must agree.
///
/// # Errors
///
/// [`GeoError::UnknownCity`] when `policy` is `Reject` and the city is not
/// supported.
pub fn pharmacies_in_range<R: Rng + ?Sized>(
    city_id: &str,
    range_km: f64,
    policy: UnknownCityPolicy,
    rng: &mut R,
) -> Result<Vec<PharmacyLocation>> {
    let Some(city) = resolve_city(city_id, policy, crate::DEFAULT_CITY_ID)? else {
        return Ok(Vec::new());
    };
    Ok(within_range(&generate_pharmacies(city, rng), range_km))
}

/// Shareable pharmacy generator owning its random source.
#[derive(Debug)]
pub struct PharmacyGenerator {
    rng: Mutex<StdRng>,
    seed: Option<u64>,
}

impl PharmacyGenerator {
    /// Generator with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
            seed: None,
        }
    }

    /// Seeded when `seed` is given, otherwise from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_os_rng, Self::seeded)
    }

    /// The configured seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate the full pharmacy set for `city`.
    pub fn generate(&self, city: &City) -> Vec<PharmacyLocation> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let pharmacies = generate_pharmacies(city, &mut *rng);
        tracing::debug!(city = city.id, count = pharmacies.len(), "Pharmacies generated");
        pharmacies
    }
}

impl Default for PharmacyGenerator {
    fn default() -> Self {
        Self::from_os_rng()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cities::find_city;
    use proptest::prelude::*;

    fn mumbai() -> &'static City {
        find_city("mumbai").unwrap()
    }

    #[test]
    fn test_generated_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let pharmacies = generate_pharmacies(mumbai(), &mut rng);

        assert_eq!(pharmacies.len(), 12);
        assert_eq!(pharmacies[0].id, "mumbai-pharmacy-1");
        assert_eq!(pharmacies[0].address, "Andheri West, Mumbai");
        assert_eq!(pharmacies[11].id, "mumbai-pharmacy-12");
        assert_eq!(pharmacies[11].city, "Mumbai");

        for (i, p) in pharmacies.iter().enumerate() {
            let base = 0.3 + i as f64 * 0.8;
            assert!(p.distance >= round1(base) && p.distance <= round1(base + 0.5), "{p:?}");
            assert!((3.5..=5.0).contains(&p.rating));
            assert!((p.latitude - 19.0760).abs() <= 0.050_001);
            assert!((p.longitude - 72.8777).abs() <= 0.050_001);
            assert_eq!(p.is_24_hours, i % 4 == 0);
            let hours = if i % 4 == 0 { OPEN_24_HOURS } else { DAYTIME_HOURS };
            assert_eq!(p.opening_hours, hours);
        }
    }

    #[test]
    fn test_same_seed_same_set() {
        let a = PharmacyGenerator::seeded(42).generate(mumbai());
        let b = PharmacyGenerator::seeded(42).generate(mumbai());
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_calls_differ() {
        let generator = PharmacyGenerator::seeded(42);
        let a = generator.generate(mumbai());
        let b = generator.generate(mumbai());
        assert_ne!(a, b);
    }

    #[test]
    fn test_mumbai_five_km() {
        let mut rng = StdRng::seed_from_u64(3);
        let all = generate_pharmacies(mumbai(), &mut rng);
        let mut rng = StdRng::seed_from_u64(3);
        let near = pharmacies_in_range("mumbai", 5.0, UnknownCityPolicy::Fallback, &mut rng).unwrap();

        let expected: Vec<_> = all.iter().filter(|p| p.distance <= 5.0).cloned().collect();
        assert_eq!(near, expected);
        // indices 0..=5 top out at 4.8 km, index 6 starts at 5.1 km
        assert_eq!(near.len(), 6);
    }

    #[test]
    fn test_unknown_city_policies() {
        let mut rng = StdRng::seed_from_u64(1);
        let fallback = pharmacies_in_range("atlantis", 20.0, UnknownCityPolicy::Fallback, &mut rng).unwrap();
        assert!(fallback.iter().all(|p| p.city == "Mumbai"));

        let empty = pharmacies_in_range("atlantis", 20.0, UnknownCityPolicy::Empty, &mut rng).unwrap();
        assert!(empty.is_empty());

        assert!(pharmacies_in_range("atlantis", 20.0, UnknownCityPolicy::Reject, &mut rng).is_err());
    }

    #[test]
    fn test_serialized_field_names() {
        let mut rng = StdRng::seed_from_u64(9);
        let p = &generate_pharmacies(mumbai(), &mut rng)[0];
        let json = serde_json::to_value(p).unwrap();

        assert!(json.get("openingHours").is_some());
        assert!(json.get("hasParking").is_some());
        assert_eq!(json["is24Hours"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(5.0).is_ok());
        assert!(validate_range(0.0).is_err());
        assert!(validate_range(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn range_filter_is_monotonic(seed in any::<u64>(), r1 in 0.0f64..25.0, r2 in 0.0f64..25.0) {
            let (small, large) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
            let set = PharmacyGenerator::seeded(seed).generate(mumbai());

            let inner = within_range(&set, small);
            let outer = within_range(&set, large);

            prop_assert!(inner.iter().all(|p| outer.contains(p)));
            prop_assert!(outer.iter().all(|p| p.distance <= large));
        }
    }
}
