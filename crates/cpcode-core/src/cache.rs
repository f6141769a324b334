//! In-memory, time-expiring store of resolved base URLs.
//!
//! Entries are keyed by project name. Expiry is checked lazily: a stale
//! entry is dropped when it is read, never by a background sweep, so memory
//! grows only with the number of distinct projects looked up.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

/// Default cache timeout in seconds.
pub const DEFAULT_CACHE_TIMEOUT_SECS: i64 = 600;

/// Source of the current time for entry stamping and expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A cached base URL and the moment it was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub value: String,
    pub timestamp: Instant,
}

/// Process-scoped cache of resolved base URLs.
///
/// Every operation holds the lock for its full read-evict or write step.
pub struct UrlCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl UrlCache {
    /// Create an empty cache using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache with a custom time source.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Look up `key`, treating entries older than `timeout_secs` as absent.
    ///
    /// A stale entry is removed as part of the read. Zero or negative
    /// timeouts mean nothing is ever fresh.
    pub fn get(&self, key: &str, timeout_secs: i64) -> Option<String> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;

        let age_ms = self
            .clock
            .now()
            .saturating_duration_since(entry.timestamp)
            .as_millis() as i128;
        let timeout_ms = i128::from(timeout_secs) * 1000;

        if age_ms < timeout_ms {
            tracing::debug!("Cache hit for {}", key);
            return Some(entry.value.clone());
        }

        tracing::debug!("Cache entry for {} expired", key);
        entries.remove(key);
        None
    }

    /// Insert or overwrite `key`, stamped with the current time.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) {
        let entry = CacheEntry {
            value: value.into(),
            timestamp: self.clock.now(),
        };
        self.lock().insert(key.into(), entry);
    }

    /// Remove a single entry if present.
    pub fn invalidate(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            tracing::debug!("Invalidated cache entry for {}", key);
        }
    }

    /// Remove every entry.
    pub fn clear_all(&self) {
        self.lock().clear();
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for UrlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UrlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlCache")
            .field("entries", &self.len())
            .finish()
    }
}
