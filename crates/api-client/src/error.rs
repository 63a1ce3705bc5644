//! Error types for the API client

use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rows arrived but do not form a valid catalog
    #[error("Invalid catalog data: {0}")]
    Catalog(#[from] medfinder_search::SearchError),

    /// Rows arrived but break the inventory rules
    #[error("Invalid inventory data: {0}")]
    Inventory(#[from] medfinder_inventory::InventoryError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// API returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message from API
        message: String,
    },

    /// A single row was expected but none matched
    #[error("Not found: {0}")]
    NotFound(String),

    /// Circuit breaker is open
    #[error("Circuit breaker is open - service temporarily unavailable")]
    CircuitOpen,

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::CircuitOpen
            | Self::Config(_)
            | Self::MissingEnvVar(_)
            | Self::Json(_)
            | Self::Catalog(_)
            | Self::Inventory(_)
            | Self::NotFound(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if the backend refused the credentials
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 401 | 403, .. })
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }

    /// Numeric code in the backend family
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            _ if self.is_unauthorized() => 7001,
            Self::Request(e) if e.is_timeout() => 7002,
            Self::Json(_) | Self::Catalog(_) => 4002,
            Self::Inventory(e) => e.code(),
            Self::Config(_) | Self::MissingEnvVar(_) => 3000,
            _ => 7000,
        }
    }
}

impl From<ApiError> for medfinder_core::Error {
    fn from(err: ApiError) -> Self {
        use medfinder_core::{Error, ErrorCode};

        if let ApiError::Inventory(e) = err {
            return e.into();
        }

        let code = match err.code() {
            7001 => ErrorCode::Unauthorized,
            7002 => ErrorCode::Timeout,
            4002 => ErrorCode::CatalogParseError,
            3000 => ErrorCode::ConfigError,
            _ => ErrorCode::BackendError,
        };
        let suggestion = match &err {
            ApiError::MissingEnvVar(var) => Some(format!("Set {var} or pass --catalog <file>")),
            e if e.is_unauthorized() => Some("Set MEDFINDER_ACCESS_TOKEN to a valid session token".to_string()),
            _ => None,
        };

        let core = Error::new(code, err.to_string());
        match suggestion {
            Some(s) => core.with_suggestion(s),
            None => core,
        }
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Endpoint that was called
    pub endpoint: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}
