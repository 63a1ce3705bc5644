//! The search session.

use crate::compose::{compose, MedicineAvailability};
use crate::directory::PharmacyDirectory;
use crate::error::Result;
use medfinder_core::cache::CacheStats;
use medfinder_core::config::{ConfigSchema, SubmitMatcher};
use medfinder_geo::{City, Coordinate, PharmacyGenerator, PharmacyLocation};
use medfinder_search::{
    filter_loose, filter_tiered, suggest, suggest_scored, Catalog, Category, MatchResult,
    MedicineRecord,
};
use medfinder_telemetry::{metrics, Timer};

/// A submitted search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    /// Free-text medicine query
    pub query: String,
    /// City id; the configured default city when unset
    pub city: Option<String>,
    /// Radius in km; the configured default radius when unset
    pub range_km: Option<f64>,
    /// Detected or entered user position
    pub user_location: Option<Coordinate>,
}

impl SearchRequest {
    /// Request for `query` with every other setting left to configuration.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Search in `city`.
    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Search within `range_km`.
    #[must_use]
    pub fn range_km(mut self, range_km: f64) -> Self {
        self.range_km = Some(range_km);
        self
    }

    /// Report distances from `location` too.
    #[must_use]
    pub fn user_location(mut self, location: Coordinate) -> Self {
        self.user_location = Some(location);
        self
    }
}

/// Catalog, configuration and pharmacy sets for one session.
///
/// ```
/// use medfinder_core::config::ConfigSchema;
/// use medfinder_finder::{bundled_catalog, Finder, SearchRequest};
///
/// let finder = Finder::new(bundled_catalog().unwrap(), ConfigSchema::default());
/// let results = finder.search(&SearchRequest::new("crocin").city("mumbai")).unwrap();
/// assert_eq!(results[0].medicine.id, "m1");
/// ```
#[derive(Debug)]
pub struct Finder {
    catalog: Catalog,
    config: ConfigSchema,
    directory: PharmacyDirectory,
}

impl Finder {
    /// Session over `catalog`.
    pub fn new(catalog: Catalog, config: ConfigSchema) -> Self {
        let directory = PharmacyDirectory::new(&config.finder);
        Self {
            catalog,
            config,
            directory,
        }
    }

    /// Session drawing pharmacies from `generator` instead of the configured seed.
    pub fn with_generator(catalog: Catalog, config: ConfigSchema, generator: PharmacyGenerator) -> Self {
        let directory = PharmacyDirectory::with_generator(&config.finder, generator);
        Self {
            catalog,
            config,
            directory,
        }
    }

    /// The session's medicine catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Settings the session was built with.
    pub fn config(&self) -> &ConfigSchema {
        &self.config
    }

    /// Pharmacy sets generated so far.
    ///
    /// ```
    /// use medfinder_core::config::ConfigSchema;
    /// use medfinder_finder::Finder;
    /// use medfinder_search::Catalog;
    ///
    /// let finder = Finder::new(Catalog::empty(), ConfigSchema::default());
    /// let pharmacy = finder.directory().pharmacy("pune-pharmacy-2").unwrap();
    /// assert_eq!(pharmacy.city, "Pune");
    /// ```
    pub fn directory(&self) -> &PharmacyDirectory {
        &self.directory
    }

    /// Live suggestions for `query`, best first.
    pub fn suggest(&self, query: &str) -> Vec<&MedicineRecord> {
        suggest(query, &self.catalog, self.config.search.max_suggestions)
    }

    /// Live suggestions with their scores.
    pub fn suggest_scored(&self, query: &str) -> Vec<MatchResult<'_>> {
        suggest_scored(query, &self.catalog, self.config.search.max_suggestions)
    }

    /// Medicines a submitted `query` is about, in catalog order.
    pub fn matching(&self, query: &str) -> Vec<&MedicineRecord> {
        match self.config.search.submit_matcher {
            SubmitMatcher::Loose => filter_loose(query, &self.catalog),
            SubmitMatcher::Tiered => filter_tiered(query, &self.catalog),
        }
    }

    /// Catalog medicines in `category`, in catalog order.
    pub fn browse(&self, category: &Category) -> Vec<&MedicineRecord> {
        self.catalog.by_category(category).collect()
    }

    /// The city a search in `city_id` would use.
    ///
    /// # Errors
    ///
    /// Unknown city under the `reject` policy.
    pub fn city(&self, city_id: &str) -> Result<Option<&'static City>> {
        self.directory.resolve(city_id)
    }

    /// Pharmacies within the radius, in generation order. Unset values come
    /// from configuration.
    ///
    /// # Errors
    ///
    /// Invalid radius, or unknown city under the `reject` policy.
    pub fn pharmacies(&self, city: Option<&str>, range_km: Option<f64>) -> Result<Vec<PharmacyLocation>> {
        let city = city.unwrap_or(&self.config.finder.default_city);
        let range_km = range_km.unwrap_or(self.config.finder.default_range_km);
        self.directory.in_range(city, range_km)
    }

    /// Medicines matching the request with the nearby pharmacies that stock
    /// them. An empty query finds nothing.
    ///
    /// # Errors
    ///
    /// Invalid radius, or unknown city under the `reject` policy.
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<MedicineAvailability>> {
        let _timer = Timer::start("finder.search");
        metrics().increment("finder.searches");

        let medicines = self.matching(&request.query);
        if medicines.is_empty() {
            tracing::debug!(query = %request.query, "No medicines match");
            return Ok(Vec::new());
        }

        let pharmacies = self.pharmacies(request.city.as_deref(), request.range_km)?;

        let user = request.user_location.filter(|loc| {
            let valid = loc.is_valid();
            if !valid {
                tracing::debug!(?loc, "Ignoring invalid user location");
            }
            valid
        });

        let results = compose(medicines, &pharmacies, user.as_ref());
        tracing::info!(
            query = %request.query,
            medicines = results.len(),
            pharmacies = pharmacies.len(),
            "Search completed"
        );
        Ok(results)
    }

    /// Directory cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        self.directory.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundled_catalog;
    use medfinder_search::MatchType;

    fn finder_with(config: ConfigSchema) -> Finder {
        Finder::with_generator(bundled_catalog().unwrap(), config, PharmacyGenerator::seeded(3))
    }

    fn finder() -> Finder {
        finder_with(ConfigSchema::default())
    }

    #[test]
    fn test_crocin_suggests_paracetamol() {
        let finder = finder();
        let results = finder.suggest_scored("crocin");

        assert_eq!(results[0].medicine.id, "m1");
        assert_eq!(results[0].match_type, MatchType::AliasExact);
        assert_eq!(results[0].score, 95.0);
    }

    #[test]
    fn test_suggestions_bounded_by_config() {
        let mut config = ConfigSchema::default();
        config.search.max_suggestions = 3;
        let finder = finder_with(config);

        assert_eq!(finder.suggest("a").len(), 3);
        assert!(finder.suggest("   ").is_empty());
    }

    #[test]
    fn test_search_crocin_mumbai() {
        let finder = finder();
        let results = finder
            .search(&SearchRequest::new("crocin").city("mumbai").range_km(5.0))
            .unwrap();

        assert_eq!(results.len(), 1);
        let paracetamol = &results[0];
        assert_eq!(paracetamol.medicine.name, "Paracetamol");
        assert_eq!(paracetamol.total_pharmacies, 6);
        assert!(paracetamol.available_at.len() <= 6);
        assert!(paracetamol
            .available_at
            .iter()
            .all(|s| s.pharmacy.distance <= 5.0 && s.stock.in_stock));
        assert!(paracetamol
            .available_at
            .iter()
            .any(|s| s.pharmacy.id == "mumbai-pharmacy-1"));
        assert!(paracetamol
            .available_at
            .iter()
            .all(|s| s.pharmacy.id != "mumbai-pharmacy-3"));
    }

    #[test]
    fn test_search_uses_configured_defaults() {
        let finder = finder();
        let explicit = finder
            .search(&SearchRequest::new("fever").city("mumbai").range_km(5.0))
            .unwrap();
        let defaults = finder.search(&SearchRequest::new("fever")).unwrap();

        assert_eq!(explicit, defaults);
        // category match keeps catalog order
        let ids: Vec<_> = defaults.iter().map(|r| r.medicine.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort_by_key(|id| id[1..].parse::<u32>().unwrap());
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search_is_stable_within_session() {
        let finder = finder();
        let request = SearchRequest::new("para").city("delhi").range_km(10.0);
        assert_eq!(finder.search(&request).unwrap(), finder.search(&request).unwrap());
        assert_eq!(finder.cache_stats().total_entries, 1);
    }

    #[test]
    fn test_empty_query_finds_nothing() {
        let finder = finder();
        assert!(finder.search(&SearchRequest::new("  ")).unwrap().is_empty());
        assert_eq!(finder.cache_stats().total_entries, 0);
    }

    #[test]
    fn test_submit_matcher_choice() {
        let loose = finder();
        let mut config = ConfigSchema::default();
        config.search.submit_matcher = SubmitMatcher::Tiered;
        let tiered = finder_with(config);

        // "fever" is a category, never a name or alias
        assert_eq!(loose.matching("fever").len(), 3);
        assert!(tiered.matching("fever").is_empty());

        // "pctml" is only a subsequence of Paracetamol
        assert!(loose.matching("pctml").is_empty());
        assert_eq!(tiered.matching("pctml")[0].id, "m1");
    }

    #[test]
    fn test_user_location() {
        let finder = finder();
        let near = finder
            .search(
                &SearchRequest::new("crocin")
                    .city("mumbai")
                    .user_location(Coordinate::new(19.07, 72.87)),
            )
            .unwrap();
        assert!(near[0].available_at.iter().all(|s| s.distance_from_user.is_some()));

        let invalid = finder
            .search(&SearchRequest::new("crocin").user_location(Coordinate::new(200.0, 0.0)))
            .unwrap();
        assert!(invalid[0].available_at.iter().all(|s| s.distance_from_user.is_none()));
    }

    #[test]
    fn test_browse_category() {
        let finder = finder();
        let heart: Vec<_> = finder
            .browse(&Category::Heart)
            .into_iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(heart, ["Atorvastatin", "Aspirin", "Clopidogrel"]);
    }
}
