//! Error types for the search crate.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur while building a catalog.
///
/// Matching and ranking never fail; only catalog construction from
/// external data does.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Catalog JSON could not be parsed
    #[error("Invalid catalog data: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    /// A catalog row is missing a required value
    #[error("Invalid medicine record `{id}`: {reason}")]
    InvalidRecord {
        /// Record id as given
        id: String,
        /// What is wrong with it
        reason: String,
    },
}

impl SearchError {
    /// Numeric code in the catalog family
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidCatalog(_) => 4002,
            Self::InvalidRecord { .. } => 4004,
        }
    }
}
