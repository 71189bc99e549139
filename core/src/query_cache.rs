//! Time-based memoization of query results.
//!
//! Entries are keyed by query name + parameters and expire after a fixed TTL.
//! Values are held as `serde_json::Value` so every row type shares one cache.
//! Failed computations are never cached.

use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// One hour, matching how often the underlying catalog is expected to change.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

struct Entry {
    stored_at: Instant,
    value: serde_json::Value,
}

pub struct QueryCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached value for `key` if still fresh, otherwise run `f`
    /// and cache its result. Errors from `f` pass through uncached.
    pub fn get_or_try_insert<T, E, F>(&self, key: &str, f: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<serde_json::Error>,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(hit) = self.lookup(key) {
            match serde_json::from_value::<T>(hit) {
                Ok(value) => {
                    log::debug!("query cache hit: {key}");
                    return Ok(value);
                }
                // Same key reused with a different row type; recompute.
                Err(e) => log::warn!("query cache entry {key} unreadable: {e}"),
            }
        }

        log::debug!("query cache miss: {key}");
        let value = f()?;
        let json = serde_json::to_value(&value)?;
        let ttl = self.ttl;
        let mut entries = self.lock();
        // Keys carry request ids, so one-off entries must not outlive their TTL.
        entries.retain(|_, e| e.stored_at.elapsed() < ttl);
        entries.insert(
            key.to_string(),
            Entry {
                stored_at: Instant::now(),
                value: json,
            },
        );
        Ok(value)
    }

    /// Drop every entry.
    pub fn invalidate_all(&self) {
        self.lock().clear();
    }

    /// Number of entries that have not yet expired.
    pub fn len(&self) -> usize {
        let ttl = self.ttl;
        self.lock()
            .values()
            .filter(|e| e.stored_at.elapsed() < ttl)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<serde_json::Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(e) if e.stored_at.elapsed() < self.ttl => Some(e.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned cache only ever holds complete entries; keep using it.
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
