//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// City id is not one of the supported cities
    #[error("Unknown city: {0}")]
    UnknownCity(String),

    /// Invalid coordinate values or text
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Search radius is not a positive number
    #[error("Invalid range: {0} km")]
    InvalidRange(f64),
}

/// Error code for integration with medfinder-core error handling.
/// Range: 5xxx for location errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// City id not supported
    UnknownCity = 5001,
    /// Invalid coordinate values
    InvalidCoordinate = 5002,
    /// Invalid search radius
    InvalidRange = 5004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::UnknownCity(_) => GeoErrorCode::UnknownCity,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidRange(_) => GeoErrorCode::InvalidRange,
        }
    }
}

impl From<GeoError> for medfinder_core::Error {
    fn from(err: GeoError) -> Self {
        use medfinder_core::{Error, ErrorCode};

        match &err {
            GeoError::UnknownCity(id) => Error::unknown_city(id),
            GeoError::InvalidCoordinate(_) => Error::new(ErrorCode::InvalidCoordinate, err.to_string())
                .with_suggestion("Enter the location as `latitude,longitude`, e.g. 19.07,72.87"),
            GeoError::InvalidRange(_) => Error::new(ErrorCode::LocationError, err.to_string()),
        }
    }
}
