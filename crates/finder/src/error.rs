//! Error types for the finder crate.

use medfinder_geo::GeoError;
use medfinder_search::SearchError;
use thiserror::Error;

/// Result type alias for finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;

/// Errors from a finder session.
#[derive(Debug, Error)]
pub enum FinderError {
    /// City or range problem
    #[error(transparent)]
    Geo(#[from] GeoError),

    /// Catalog could not be built
    #[error(transparent)]
    Catalog(#[from] SearchError),
}

impl From<FinderError> for medfinder_core::Error {
    fn from(err: FinderError) -> Self {
        match err {
            FinderError::Geo(e) => e.into(),
            FinderError::Catalog(e) => {
                medfinder_core::Error::new(medfinder_core::ErrorCode::CatalogParseError, e.to_string())
            }
        }
    }
}
