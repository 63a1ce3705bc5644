//! Per-session pharmacy directory.
//!
//! Generation is random, so the first set generated for a city is kept for
//! the rest of the session (or until the TTL runs out). Every range query on
//! that city filters the same set, which keeps results monotonic in the
//! radius.

use crate::error::Result;
use medfinder_core::cache::{CacheConfig, CacheStats, SessionCache};
use medfinder_core::config::{FinderConfig, UnknownCityPolicy};
use medfinder_geo::{
    resolve_city, validate_range, within_range, City, PharmacyGenerator, PharmacyLocation,
};
use std::sync::Arc;

/// Cached pharmacy sets keyed by city id.
#[derive(Debug)]
pub struct PharmacyDirectory {
    generator: PharmacyGenerator,
    cache: SessionCache<&'static str, Arc<Vec<PharmacyLocation>>>,
    policy: UnknownCityPolicy,
    default_city: String,
}

impl PharmacyDirectory {
    /// Directory configured from the `[finder]` section.
    pub fn new(config: &FinderConfig) -> Self {
        Self::with_generator(config, PharmacyGenerator::new(config.seed))
    }

    /// Directory drawing from `generator`.
    pub fn with_generator(config: &FinderConfig, generator: PharmacyGenerator) -> Self {
        Self {
            generator,
            cache: SessionCache::new(CacheConfig::from_ttl_secs(config.cache_ttl_secs)),
            policy: config.unknown_city,
            default_city: config.default_city.clone(),
        }
    }

    /// The city `city_id` resolves to under the configured policy.
    ///
    /// # Errors
    ///
    /// Unknown city under the `reject` policy.
    pub fn resolve(&self, city_id: &str) -> Result<Option<&'static City>> {
        Ok(resolve_city(city_id, self.policy, &self.default_city)?)
    }

    /// Every pharmacy of the city, generated on first use.
    ///
    /// # Errors
    ///
    /// Unknown city under the `reject` policy.
    pub fn all(&self, city_id: &str) -> Result<Arc<Vec<PharmacyLocation>>> {
        let Some(city) = self.resolve(city_id)? else {
            return Ok(Arc::default());
        };
        Ok(self.cache.get_or_insert_with(city.id, || {
            tracing::debug!(city = city.id, seed = ?self.generator.seed(), "Generating pharmacy set");
            Arc::new(self.generator.generate(city))
        }))
    }

    /// Pharmacies of the city no farther than `range_km`, in generation order.
    ///
    /// # Errors
    ///
    /// Invalid radius, or unknown city under the `reject` policy.
    pub fn in_range(&self, city_id: &str, range_km: f64) -> Result<Vec<PharmacyLocation>> {
        let range_km = validate_range(range_km)?;
        Ok(within_range(&self.all(city_id)?, range_km))
    }

    /// Look up a pharmacy by id in an already generated set.
    pub fn pharmacy(&self, pharmacy_id: &str) -> Option<PharmacyLocation> {
        let (city_id, _) = pharmacy_id.split_once("-pharmacy-")?;
        let city = medfinder_geo::find_city(city_id)?;
        self.all(city.id)
            .ok()?
            .iter()
            .find(|p| p.id == pharmacy_id)
            .cloned()
    }

    /// Forget every generated set.
    pub fn reset(&self) {
        self.cache.clear();
    }

    /// Cache counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinderError;
    use medfinder_geo::GeoError;

    fn directory(policy: UnknownCityPolicy) -> PharmacyDirectory {
        let config = FinderConfig {
            unknown_city: policy,
            seed: Some(11),
            ..FinderConfig::default()
        };
        PharmacyDirectory::new(&config)
    }

    #[test]
    fn test_set_is_stable_per_session() {
        let dir = directory(UnknownCityPolicy::Fallback);
        let first = dir.all("pune").unwrap();
        let second = dir.all("PUNE").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(dir.stats().total_entries, 1);

        dir.reset();
        assert_eq!(dir.stats().total_entries, 0);
    }

    #[test]
    fn test_mumbai_five_km() {
        let dir = directory(UnknownCityPolicy::Fallback);
        let near = dir.in_range("mumbai", 5.0).unwrap();

        assert_eq!(near.len(), 6);
        assert!(near.iter().all(|p| p.distance <= 5.0));
        let ids: Vec<_> = near.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids[0], "mumbai-pharmacy-1");
        assert_eq!(ids[5], "mumbai-pharmacy-6");
    }

    #[test]
    fn test_range_monotonic() {
        let dir = directory(UnknownCityPolicy::Fallback);
        let mut previous = 0;
        for range in [1.0, 2.0, 5.0, 10.0, 15.0, 20.0] {
            let near = dir.in_range("chennai", range).unwrap();
            assert!(near.len() >= previous);
            previous = near.len();
        }
        assert_eq!(previous, 12);
    }

    #[test]
    fn test_unknown_city_policies() {
        let fallback = directory(UnknownCityPolicy::Fallback);
        let set = fallback.all("atlantis").unwrap();
        assert!(set.iter().all(|p| p.id.starts_with("mumbai-")));
        // fallback shares the default city's set
        assert!(Arc::ptr_eq(&set, &fallback.all("mumbai").unwrap()));

        let empty = directory(UnknownCityPolicy::Empty);
        assert!(empty.in_range("atlantis", 20.0).unwrap().is_empty());

        let reject = directory(UnknownCityPolicy::Reject);
        assert!(matches!(
            reject.in_range("atlantis", 20.0),
            Err(FinderError::Geo(GeoError::UnknownCity(_)))
        ));
    }

    #[test]
    fn test_invalid_range() {
        let dir = directory(UnknownCityPolicy::Fallback);
        assert!(dir.in_range("delhi", 0.0).is_err());
        assert!(dir.in_range("delhi", f64::NAN).is_err());
    }

    #[test]
    fn test_pharmacy_lookup() {
        let dir = directory(UnknownCityPolicy::Fallback);
        let found = dir.pharmacy("jaipur-pharmacy-4").unwrap();
        assert_eq!(found.city, "Jaipur");
        assert!(dir.pharmacy("jaipur-pharmacy-13").is_none());
        assert!(dir.pharmacy("nowhere").is_none());
    }
}
