//! Configuration for the medfinder API client
//!
//! Settings come from the environment; everything except the project URL
//! has a default.

use crate::error::{ApiError, ApiResult};
use medfinder_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Project URL variable
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
/// Public anon key variable
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Signed-in user's access token variable
pub const ACCESS_TOKEN_VAR: &str = "MEDFINDER_ACCESS_TOKEN";
/// Environment name variable
pub const ENV_VAR: &str = "MEDFINDER_ENV";
/// Timeout override variable
pub const TIMEOUT_VAR: &str = "MEDFINDER_TIMEOUT_SECS";

/// Local Supabase started by the Supabase CLI
const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (typically localhost Supabase)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse an environment name; anything unrecognized is production
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Read from `MEDFINDER_ENV`
    pub fn from_env() -> Self {
        Self::parse(&env::var(ENV_VAR).unwrap_or_default())
    }

    /// Retry policy suited to the environment
    pub fn retry(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Supabase project URL, e.g. `https://abc.supabase.co`
    pub supabase_url: String,
    /// Public anon key, sent as `apikey`
    pub anon_key: Option<String>,
    /// Signed-in user's JWT, sent as bearer token (the anon key otherwise)
    pub access_token: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl ClientConfig {
    /// Configuration for a project URL with environment defaults
    pub fn new(supabase_url: impl Into<String>, environment: Environment) -> Self {
        Self {
            supabase_url: supabase_url.into().trim_end_matches('/').to_string(),
            anon_key: None,
            access_token: None,
            timeout: DEFAULT_TIMEOUT,
            retry: environment.retry(),
            environment,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SUPABASE_URL`: project URL (required outside development)
    /// - `SUPABASE_ANON_KEY`: public anon key
    /// - `MEDFINDER_ACCESS_TOKEN`: signed-in user's access token
    /// - `MEDFINDER_ENV`: environment (development/staging/production)
    /// - `MEDFINDER_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) over any variable source
    pub fn from_lookup<F>(lookup: F) -> ApiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup(ENV_VAR).map_or_else(Environment::default, |v| Environment::parse(&v));

        let supabase_url = match (lookup(SUPABASE_URL_VAR), environment) {
            (Some(url), _) => url,
            (None, Environment::Development) => LOCAL_SUPABASE_URL.to_string(),
            (None, _) => return Err(ApiError::missing_env(SUPABASE_URL_VAR)),
        };

        let timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("{TIMEOUT_VAR} must be whole seconds, got '{raw}'")))?,
            None => DEFAULT_TIMEOUT,
        };

        let mut config = Self::new(supabase_url, environment).with_timeout(timeout);
        config.anon_key = lookup(ANON_KEY_VAR).filter(|k| !k.is_empty());
        config.access_token = lookup(ACCESS_TOKEN_VAR).filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self::new(LOCAL_SUPABASE_URL, Environment::Development).with_timeout(Duration::from_secs(10))
    }

    /// PostgREST base URL
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.supabase_url)
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set the user's access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Token for the `Authorization` header
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.anon_key.as_deref())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.supabase_url.is_empty() {
            return Err(ApiError::config("supabase_url cannot be empty"));
        }

        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(ApiError::config("supabase_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
