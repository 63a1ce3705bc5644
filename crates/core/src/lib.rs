//! Core utilities for medfinder
//!
//! This crate provides shared functionality used by the search, geo, inventory
//! and finder crates:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Session cache**: in-memory keyed cache with optional TTL
//! - **Retry**: exponential backoff and a circuit breaker for backend calls
//!
//! # Example
//!
//! ```rust
//! use medfinder_core::cache::SessionCache;
//!
//! let cache: SessionCache<String, u32> = SessionCache::unbounded();
//! let value = cache.get_or_insert_with("mumbai".to_string(), || 12);
//! assert_eq!(value, 12);
//! assert_eq!(cache.get("mumbai"), Some(12));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod config;
pub mod error;
pub mod retry;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheConfig, CacheStats, SessionCache};
    pub use crate::config::{Config, ConfigSchema, SubmitMatcher, UnknownCityPolicy};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
}
