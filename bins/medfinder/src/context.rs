//! Shared state for every command: configuration, output format and where
//! the medicine catalog comes from.

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use medfinder_api_client::MedfinderClient;
use medfinder_cli::progress::{finish_error, finish_success, spinner};
use medfinder_cli::{OutputFormat, Status};
use medfinder_core::config::Config;
use medfinder_core::{Error, ErrorCode};
use medfinder_finder::{bundled_catalog, Finder, FinderError};
use medfinder_search::Catalog;
use medfinder_telemetry::TelemetryConfig;
use std::path::{Path, PathBuf};

/// Where the medicine catalog is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A JSON file of medicine rows
    File(PathBuf),
    /// The sample catalog compiled into the binary
    Bundled,
    /// The `medicines` table, falling back to the sample catalog when the
    /// backend is not configured
    Backend,
}

/// Per-invocation context
pub struct AppContext {
    pub config: Config,
    pub format: OutputFormat,
    source: CatalogSource,
}

impl AppContext {
    pub fn load(
        config_path: Option<&Path>,
        catalog: Option<PathBuf>,
        offline: bool,
        seed: Option<u64>,
        format: OutputFormat,
    ) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        let finder = &mut config.schema.finder;
        finder.seed = seed.or(finder.seed).or_else(|| {
            let day = chrono::Local::now().date_naive();
            tracing::debug!(%day, "No seed configured, using the day's seed");
            Some(day_seed(day))
        });

        let source = match (catalog, offline) {
            (Some(path), _) => CatalogSource::File(path),
            (None, true) => CatalogSource::Bundled,
            (None, false) => CatalogSource::Backend,
        };

        Ok(Self {
            config,
            format,
            source,
        })
    }

    /// Logging settings from the config file, raised by `-v`
    pub fn telemetry_config(&self, verbose: u8) -> TelemetryConfig {
        let logging = &self.config.schema.logging;
        TelemetryConfig {
            log_level: logging.level.clone(),
            json: logging.json,
            log_dir: logging.log_dir.as_ref().map(PathBuf::from),
            ..TelemetryConfig::default()
        }
        .with_verbosity(verbose)
    }

    /// Load the medicine catalog.
    ///
    /// A backend that cannot be reached yields an empty catalog and a
    /// warning; searches then find nothing.
    pub async fn catalog(&self) -> Result<Catalog> {
        match &self.source {
            CatalogSource::File(path) => read_catalog_file(path),
            CatalogSource::Bundled => Ok(bundled_catalog().map_err(Error::from)?),
            CatalogSource::Backend => {
                let client = match MedfinderClient::new() {
                    Ok(client) => client,
                    Err(e) => {
                        tracing::debug!(error = %e, "Backend not configured");
                        Status::warning("No backend configured; using the bundled sample catalog");
                        return Ok(bundled_catalog().map_err(Error::from)?);
                    }
                };

                let pb = spinner("Loading medicines...");
                let load = client.medicines().load_catalog_or_empty().await;
                match load.notice {
                    Some(notice) => {
                        finish_error(&pb, "Medicine catalog unavailable");
                        Status::warning(&notice);
                    }
                    None => finish_success(&pb, &format!("Loaded {} medicines", load.catalog.len())),
                }
                Ok(load.catalog)
            }
        }
    }

    /// A search session over the loaded catalog
    pub async fn finder(&self) -> Result<Finder> {
        let catalog = self.catalog().await?;
        Ok(self.finder_with(catalog))
    }

    /// A session for commands that never look at medicines
    pub fn pharmacy_finder(&self) -> Finder {
        self.finder_with(Catalog::empty())
    }

    fn finder_with(&self, catalog: Catalog) -> Finder {
        Finder::new(catalog, self.config.schema.clone())
    }

    /// Backend client for inventory commands
    pub fn client(&self) -> Result<MedfinderClient> {
        Ok(MedfinderClient::new().map_err(Error::from)?)
    }
}

/// Pharmacy seed shared by every run on the same calendar day, so ids and
/// coordinates printed by one command still hold for the next.
fn day_seed(day: NaiveDate) -> u64 {
    u64::from(day.num_days_from_ce().unsigned_abs()).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn read_catalog_file(path: &Path) -> Result<Catalog> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        Error::new(ErrorCode::FileNotFound, format!("Cannot read catalog {}: {e}", path.display()))
            .with_suggestion("Pass a JSON file of medicine rows, or use --offline")
    })?;

    let catalog = Catalog::from_json(&json)
        .map_err(|e| Error::from(FinderError::from(e)).with_context(path.display().to_string()))?;
    tracing::debug!(path = %path.display(), medicines = catalog.len(), "Catalog loaded from file");
    Ok(catalog)
}

/// Wrap any error that knows its code so `main` can pick the exit status
pub fn coded<E: Into<Error>>(err: E) -> anyhow::Error {
    anyhow::Error::new(err.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_seed_changes_only_with_the_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let next = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();

        assert_eq!(day_seed(day), day_seed(day));
        assert_ne!(day_seed(day), day_seed(next));
    }

    #[test]
    fn test_seed_flag_wins_over_day_seed() {
        let ctx = AppContext::load(None, None, true, Some(7), OutputFormat::Text).unwrap();
        assert_eq!(ctx.config.schema.finder.seed, Some(7));

        let ctx = AppContext::load(None, None, true, None, OutputFormat::Text).unwrap();
        assert!(ctx.config.schema.finder.seed.is_some());
    }
}
