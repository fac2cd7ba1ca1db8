//! Time-based cache for upstream responses.
//!
//! Holds the last fetched collection list and one photo list per collection
//! id. Freshness is evaluated at read time against a fixed TTL; entries are
//! never evicted, a stale entry simply stops being returned until the next
//! successful fetch overwrites it. The map grows by one entry per distinct
//! collection id for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

/// Default freshness window for cached upstream payloads.
const DEFAULT_TTL: Duration = Duration::from_secs(600);

/// A cached payload and the moment it was fetched.
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Value,
    fetched_at: Instant,
}

impl CacheEntry {
    fn new(data: Value) -> Self {
        Self {
            data,
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    collections: Option<CacheEntry>,
    photos_by_collection: HashMap<String, CacheEntry>,
}

/// Process-lifetime cache shared by all request handlers.
///
/// Constructed once in `main` (or a test) and handed to the handlers
/// through the router state, so a bounded or evicting store can replace it
/// without touching handler logic.
#[derive(Debug)]
pub struct CacheStore {
    ttl: Duration,
    inner: Mutex<CacheInner>,
}

impl CacheStore {
    /// Create a cache with the default 10-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// The lock is only held for map access, never across an await point.
    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached collection list, if present and fresh.
    pub fn collections(&self) -> Option<Value> {
        let inner = self.lock();
        inner
            .collections
            .as_ref()
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.data.clone())
    }

    /// Overwrite the collections entry with the current timestamp.
    pub fn put_collections(&self, data: Value) {
        self.lock().collections = Some(CacheEntry::new(data));
    }

    /// Cached photo list for a collection, if present and fresh.
    pub fn photos(&self, collection_id: &str) -> Option<Value> {
        let inner = self.lock();
        inner
            .photos_by_collection
            .get(collection_id)
            .filter(|entry| entry.is_fresh(self.ttl))
            .map(|entry| entry.data.clone())
    }

    /// Insert or overwrite the photo entry for a collection.
    pub fn put_photos(&self, collection_id: &str, data: Value) {
        self.lock()
            .photos_by_collection
            .insert(collection_id.to_string(), CacheEntry::new(data));
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}
