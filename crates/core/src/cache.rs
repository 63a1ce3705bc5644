//! In-memory keyed session cache
//!
//! Holds values that are expensive or non-deterministic to produce so that
//! repeated lookups within one session see the same value. The pharmacy
//! finder keeps one generated pharmacy set per city here.
//!
//! # Example
//!
//! ```rust
//! use medfinder_core::cache::{CacheConfig, SessionCache};
//! use std::time::Duration;
//!
//! let cache = SessionCache::new(CacheConfig::with_ttl(Duration::from_secs(600)));
//! cache.insert("delhi".to_string(), vec![1.2, 3.4]);
//! assert_eq!(cache.get("delhi"), Some(vec![1.2, 3.4]));
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entry lifetime (`None` = live for the whole session)
    pub ttl: Option<Duration>,
    /// Maximum number of entries (0 = unlimited)
    pub max_entries: usize,
}

impl CacheConfig {
    /// Entries expire after `ttl`
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            max_entries: 0,
        }
    }

    /// Build from a seconds value where 0 means no expiry
    pub fn from_ttl_secs(secs: u64) -> Self {
        Self {
            ttl: (secs > 0).then(|| Duration::from_secs(secs)),
            max_entries: 0,
        }
    }
}

#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Thread-safe keyed cache with optional expiry and size bound
#[derive(Debug)]
pub struct SessionCache<K, V> {
    config: CacheConfig,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> SessionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a new cache
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cache without expiry or size bound
    pub fn unbounded() -> Self {
        Self::new(CacheConfig::default())
    }

    /// Get a live value
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match guard.get(key) {
            Some(entry) if !self.is_expired(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a value, replacing any previous one
    pub fn insert(&self, key: K, value: V) {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        self.make_room(&mut guard, &key);
        guard.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// `init` runs at most once per missing key even under concurrent callers.
    pub fn get_or_insert_with<F>(&self, key: K, init: F) -> V
    where
        F: FnOnce() -> V,
    {
        match self.get_or_try_insert_with(key, || Ok::<V, std::convert::Infallible>(init())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    /// Nothing is stored when `init` fails.
    pub fn get_or_try_insert_with<F, E>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        // Another writer may have filled the slot between the two locks
        if let Some(entry) = guard.get(&key) {
            if !self.is_expired(entry) {
                return Ok(entry.value.clone());
            }
        }

        let value = init()?;
        self.make_room(&mut guard, &key);
        guard.insert(
            key,
            CacheEntry {
                value: value.clone(),
                inserted_at: Instant::now(),
            },
        );
        Ok(value)
    }

    /// Remove a value, returning whether it was present
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Drop expired entries, returning how many were removed
    pub fn cleanup(&self) -> usize {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = guard.len();
        guard.retain(|_, entry| !self.is_expired(entry));
        before - guard.len()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let expired_entries = guard.values().filter(|e| self.is_expired(e)).count();

        CacheStats {
            total_entries: guard.len(),
            expired_entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        self.config
            .ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    /// Evict the oldest entry when inserting a new key into a full cache
    fn make_room(&self, entries: &mut HashMap<K, CacheEntry<V>>, incoming: &K) {
        if self.config.max_entries == 0
            || entries.len() < self.config.max_entries
            || entries.contains_key(incoming)
        {
            return;
        }

        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            entries.remove(&key);
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of stored entries, expired ones included
    pub total_entries: usize,
    /// Number of stored entries past their TTL
    pub expired_entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing live
    pub misses: u64,
}
