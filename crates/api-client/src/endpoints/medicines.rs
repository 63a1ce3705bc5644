//! Medicine catalog endpoint
//!
//! The catalog is fetched once per session, ordered by name.

use crate::client::MedfinderClient;
use crate::error::ApiResult;
use medfinder_search::{Catalog, MedicineRecord};

const CATALOG_PATH: &str = "medicines?select=*&order=name.asc";

/// Notice shown when the catalog could not be fetched
pub const CATALOG_UNAVAILABLE: &str = "Failed to load medicines. Search is unavailable until the catalog loads.";

/// Medicines API interface
#[derive(Clone)]
pub struct MedicinesApi {
    client: MedfinderClient,
}

/// Outcome of a catalog load that never fails
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    /// Loaded catalog, empty on failure
    pub catalog: Catalog,
    /// User-facing message when loading failed
    pub notice: Option<String>,
}

impl MedicinesApi {
    pub(crate) fn new(client: MedfinderClient) -> Self {
        Self { client }
    }

    /// All medicine rows, ordered by name
    ///
    /// GET /rest/v1/medicines?select=*&order=name.asc
    pub async fn list(&self) -> ApiResult<Vec<MedicineRecord>> {
        self.client.get(CATALOG_PATH).await
    }

    /// The catalog built from [`list`](Self::list)
    pub async fn catalog(&self) -> ApiResult<Catalog> {
        let rows = self.list().await?;
        Ok(Catalog::new(rows))
    }

    /// The catalog, or an empty one with a notice when fetching fails
    pub async fn load_catalog_or_empty(&self) -> CatalogLoad {
        match self.catalog().await {
            Ok(catalog) => {
                tracing::info!(count = catalog.len(), "Catalog loaded");
                CatalogLoad { catalog, notice: None }
            }
            Err(e) => {
                tracing::error!(error = %e, "Catalog fetch failed");
                CatalogLoad {
                    catalog: Catalog::empty(),
                    notice: Some(CATALOG_UNAVAILABLE.to_string()),
                }
            }
        }
    }
}
