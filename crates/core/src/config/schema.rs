//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Suggestion and submit-search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Pharmacy generation and range settings
    #[serde(default)]
    pub finder: FinderConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigSchema {
    /// Reject values the search and finder code cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.search.max_suggestions == 0 {
            return Err(Error::invalid_config(
                "search.max_suggestions",
                "must be at least 1",
            ));
        }

        if !(self.finder.default_range_km.is_finite() && self.finder.default_range_km > 0.0) {
            return Err(Error::invalid_config(
                "finder.default_range_km",
                "must be a positive number of kilometers",
            ));
        }

        if let Some(bad) = self
            .finder
            .range_options
            .iter()
            .find(|r| !(r.is_finite() && **r > 0.0))
        {
            return Err(Error::invalid_config(
                "finder.range_options",
                format!("{bad} is not a positive number of kilometers"),
            ));
        }

        if self.finder.default_city.trim().is_empty() {
            return Err(Error::invalid_config("finder.default_city", "cannot be empty"));
        }

        Ok(())
    }
}

/// Which matcher decides the medicine set for a submitted search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmitMatcher {
    /// Substring/prefix over name, aliases and category
    #[default]
    Loose,
    /// The same tiered matcher the live suggestions use
    Tiered,
}

/// What to do when a city id is not one of the supported cities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCityPolicy {
    /// Use the default city's pharmacies
    #[default]
    Fallback,
    /// Return no pharmacies
    Empty,
    /// Fail with an unknown-city error
    Reject,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of live suggestions
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Matcher used on submit
    #[serde(default)]
    pub submit_matcher: SubmitMatcher,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            submit_matcher: SubmitMatcher::default(),
        }
    }
}

fn default_max_suggestions() -> usize {
    8
}

/// Pharmacy finder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinderConfig {
    /// City used when none is given, and as the fallback city
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Search radius used when none is given
    #[serde(default = "default_range_km")]
    pub default_range_km: f64,

    /// Radius choices offered to users
    #[serde(default = "default_range_options")]
    pub range_options: Vec<f64>,

    /// Unknown city handling
    #[serde(default)]
    pub unknown_city: UnknownCityPolicy,

    /// Pin the pharmacy generator to a seed for reproducible output
    #[serde(default)]
    pub seed: Option<u64>,

    /// Lifetime of a cached pharmacy set in seconds (0 = whole session)
    #[serde(default)]
    pub cache_ttl_secs: u64,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            default_range_km: default_range_km(),
            range_options: default_range_options(),
            unknown_city: UnknownCityPolicy::default(),
            seed: None,
            cache_ttl_secs: 0,
        }
    }
}

fn default_city() -> String {
    "mumbai".to_string()
}

fn default_range_km() -> f64 {
    5.0
}

fn default_range_options() -> Vec<f64> {
    vec![1.0, 2.0, 5.0, 10.0, 15.0, 20.0]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,

    /// Also write a daily-rotated log file into this directory
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            log_dir: None,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.search.max_suggestions, 8);
        assert_eq!(schema.finder.range_options, vec![1.0, 2.0, 5.0, 10.0, 15.0, 20.0]);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [search]
            submit_matcher = "tiered"

            [finder]
            unknown_city = "reject"
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(schema.search.submit_matcher, SubmitMatcher::Tiered);
        assert_eq!(schema.search.max_suggestions, 8);
        assert_eq!(schema.finder.unknown_city, UnknownCityPolicy::Reject);
        assert_eq!(schema.finder.seed, Some(7));
        assert_eq!(schema.finder.default_city, "mumbai");
    }

    #[test]
    fn test_zero_suggestions_rejected() {
        let mut schema = ConfigSchema::default();
        schema.search.max_suggestions = 0;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_negative_range_rejected() {
        let mut schema = ConfigSchema::default();
        schema.finder.range_options.push(-1.0);
        assert!(schema.validate().is_err());
    }
}
