//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{InventoryApi, MedicinesApi, PharmaciesApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use medfinder_core::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// API key header for Supabase
const APIKEY_HEADER: &str = "apikey";

/// PostgREST response preference header
const PREFER_HEADER: &str = "Prefer";

/// What PostgREST should send back after a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prefer {
    /// The written rows
    Representation,
    /// Nothing
    Minimal,
}

impl Prefer {
    fn header_value(self) -> &'static str {
        match self {
            Self::Representation => "return=representation",
            Self::Minimal => "return=minimal",
        }
    }
}

/// Supabase REST client with built-in resilience patterns
///
/// This client wraps `reqwest` and adds:
/// - Automatic retry with exponential backoff
/// - Circuit breaker to stop hammering an unavailable backend
/// - Request correlation IDs for tracing
#[derive(Clone)]
pub struct MedfinderClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
}

impl MedfinderClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::with_config(config)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("medfinder-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(ref key) = config.anon_key {
            let value = HeaderValue::from_str(key)
                .map_err(|_| ApiError::config("SUPABASE_ANON_KEY is not a valid header value"))?;
            default_headers.insert(APIKEY_HEADER, value);
        }

        if let Some(token) = config.bearer_token() {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| ApiError::config("access token is not a valid header value"))?;
            default_headers.insert(AUTHORIZATION, value);
        }

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        let circuit_breaker = Arc::new(CircuitBreaker::new(CircuitBreakerConfig::default()));

        Ok(Self {
            inner,
            config: Arc::new(config),
            circuit_breaker,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get circuit breaker state
    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    /// Reset the circuit breaker
    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access the medicine catalog
    #[must_use]
    pub fn medicines(&self) -> MedicinesApi {
        MedicinesApi::new(self.clone())
    }

    /// Access pharmacy rows
    #[must_use]
    pub fn pharmacies(&self) -> PharmaciesApi {
        PharmaciesApi::new(self.clone())
    }

    /// Access pharmacy inventory rows
    #[must_use]
    pub fn inventory(&self) -> InventoryApi {
        InventoryApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    /// GET rows from a table path such as `medicines?select=*`
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self
            .request(Method::GET, path, Option::<&()>::None, None)
            .await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a row and return the stored representation
    #[instrument(skip(self, body))]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        let text = self
            .request(Method::POST, path, Some(body), Some(Prefer::Representation))
            .await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// PATCH matching rows, returning nothing
    #[instrument(skip(self, body))]
    pub async fn patch<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.request(Method::PATCH, path, Some(body), Some(Prefer::Minimal))
            .await
            .map(drop)
    }

    /// DELETE matching rows
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, Option::<&()>::None, Some(Prefer::Minimal))
            .await
            .map(drop)
    }

    /// Absolute URL for a table path
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.rest_url(), path.trim_start_matches('/'))
    }

    /// Execute a request with full resilience patterns, returning the body
    async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        prefer: Option<Prefer>,
    ) -> ApiResult<String> {
        let request_id = Uuid::new_v4().to_string();
        let url = self.url(path);

        if !self.circuit_breaker.can_execute() {
            warn!(
                request_id = %request_id,
                url = %url,
                "Circuit breaker is open, rejecting request"
            );
            return Err(ApiError::CircuitOpen);
        }

        let context = ErrorContext {
            request_id: Some(request_id),
            endpoint: path.split('?').next().unwrap_or(path).to_string(),
            method: method.to_string(),
        };
        self.execute_with_retry(&context, method, &url, body, prefer)
            .await
    }

    /// Execute request with retry logic
    async fn execute_with_retry<B: Serialize>(
        &self,
        context: &ErrorContext,
        method: Method,
        url: &str,
        body: Option<&B>,
        prefer: Option<Prefer>,
    ) -> ApiResult<String> {
        let retry_config = &self.config.retry;
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry_config.max_attempts {
            if attempt > 0 {
                let delay = retry_config.delay_for_attempt(attempt);
                debug!(
                    request = %context,
                    attempt = attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(context, method.clone(), url, body, prefer)
                .await;
            let elapsed = start.elapsed();

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request = %context,
                        attempt = attempt + 1,
                        elapsed_ms = elapsed.as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    // 4xx answers mean the backend is up
                    if e.is_client_error() {
                        self.circuit_breaker.record_success();
                    } else {
                        self.circuit_breaker.record_failure();
                    }

                    if e.is_retryable() && attempt + 1 < retry_config.max_attempts {
                        debug!(
                            request = %context,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, will retry"
                        );
                        last_error = Some(e);
                    } else {
                        debug!(
                            request = %context,
                            attempt = attempt + 1,
                            error = %e,
                            "Request failed, not retrying"
                        );
                        return Err(e);
                    }
                }
            }
        }

        Err(ApiError::RetriesExhausted {
            attempts: retry_config.max_attempts,
            last_error: last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string()),
        })
    }

    /// Execute a single request without retry
    async fn execute_single_request<B: Serialize>(
        &self,
        context: &ErrorContext,
        method: Method,
        url: &str,
        body: Option<&B>,
        prefer: Option<Prefer>,
    ) -> ApiResult<String> {
        let mut request = self.inner.request(method, url);
        if let Some(ref id) = context.request_id {
            request = request.header(X_REQUEST_ID, id);
        }
        if let Some(prefer) = prefer {
            request = request.header(PREFER_HEADER, prefer.header_value());
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            let message = postgrest_message(&text);
            warn!(request = %context, status = status.as_u16(), message = %message, "Backend rejected request");
            Err(ApiError::api_response(status.as_u16(), message))
        }
    }
}

/// The `message` of a PostgREST error body, or the raw body
fn postgrest_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = ClientConfig::development().with_anon_key("anon-key");
        let client = MedfinderClient::with_config(config).unwrap();
        assert_eq!(client.circuit_state(), CircuitState::Closed);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ClientConfig::development().with_anon_key("bad\nkey");
        assert!(matches!(MedfinderClient::with_config(config), Err(ApiError::Config(_))));
    }

    #[test]
    fn test_url() {
        let client = MedfinderClient::with_config(ClientConfig::development()).unwrap();
        assert_eq!(
            client.url("/medicines?select=*"),
            "http://localhost:54321/rest/v1/medicines?select=*"
        );
    }

    #[test]
    fn test_postgrest_message() {
        let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;
        assert_eq!(postgrest_message(body), "duplicate key value violates unique constraint");
        assert_eq!(postgrest_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(postgrest_message(""), "Unknown error");
    }

    #[test]
    fn test_open_circuit_rejects_without_network() {
        let client = MedfinderClient::with_config(ClientConfig::development()).unwrap();
        for _ in 0..CircuitBreakerConfig::default().failure_threshold {
            client.circuit_breaker.record_failure();
        }

        let result: ApiResult<Vec<serde_json::Value>> =
            tokio_test::block_on(client.get("medicines"));
        assert!(matches!(result, Err(ApiError::CircuitOpen)));

        client.reset_circuit();
        assert_eq!(client.circuit_state(), CircuitState::Closed);
    }
}
