//! Cache Store Module
//!
//! Thread-safe TTL table with lazy expiry, read-through and substring
//! invalidation.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL_SECS};

type EntryTable<V> = HashMap<String, CacheEntry<V>>;

// == Cache Store ==
/// In-process key/value store whose entries expire after a TTL.
///
/// All table access goes through one mutex, held only for the lookup or
/// mutation itself. Expired entries are dropped lazily when a read finds
/// them; nothing sweeps in the background.
///
/// Share it between handlers as `Arc<CacheStore<V>>`.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: Mutex<EntryTable<V>>,
    /// TTL in seconds applied by `set` and `get_or_compute`
    default_ttl: u64,
    /// Time source for stamping and checking expiry
    clock: Arc<dyn Clock>,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store on the system clock.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for writes that do not pass one
    pub fn new(default_ttl: u64) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(default_ttl: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            clock,
        }
    }

    /// TTL in seconds used when a write does not specify one.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    // A panicking producer never runs under this lock, so a poisoned guard
    // still holds a consistent table.
    fn table(&self) -> MutexGuard<'_, EntryTable<V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // == Get ==
    /// Returns a copy of the live value under `key`.
    ///
    /// An entry found past its expiry is removed and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let mut table = self.table();

        let expired = match table.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                debug!(key, "cache hit");
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            table.remove(key);
            debug!(key, "cache entry expired, removed");
        } else {
            debug!(key, "cache miss");
        }
        None
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores `value` under `key`, replacing any prior value and expiry.
    ///
    /// A TTL of 0 is accepted; the entry is already expired for the next
    /// read.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl_seconds: u64) {
        let key = key.into();
        let entry = CacheEntry::new(value, ttl_seconds, self.clock.now_ms());

        debug!(key = %key, ttl_seconds, "cache set");
        self.table().insert(key, entry);
    }

    // == Delete ==
    /// Removes `key`. Absent keys are ignored.
    pub fn delete(&self, key: &str) {
        if self.table().remove(key).is_some() {
            debug!(key, "cache entry deleted");
        }
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        let removed = {
            let mut table = self.table();
            let count = table.len();
            table.clear();
            count
        };
        info!(removed, "cache cleared");
    }

    // == Stats ==
    /// Counts live and expired entries without evicting anything.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        let table = self.table();
        let expired = table.values().filter(|e| e.is_expired(now)).count();

        CacheStats::new(table.len(), expired)
    }

    // == Read-Through ==
    /// Returns the cached value for `key`, or runs `producer` and caches its
    /// result with the default TTL.
    pub fn get_or_compute<F, E>(&self, key: &str, producer: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        self.get_or_compute_with_ttl(key, self.default_ttl, producer)
    }

    /// Read-through with an explicit TTL.
    ///
    /// `producer` runs on the calling thread with the lock released, so
    /// concurrent misses on the same key may each run it; the last write
    /// wins. An `Err` is returned as-is and nothing is stored.
    pub fn get_or_compute_with_ttl<F, E>(
        &self,
        key: &str,
        ttl_seconds: u64,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = producer()?;
        self.set_with_ttl(key, value.clone(), ttl_seconds);
        Ok(value)
    }

    /// Async read-through for request handlers.
    ///
    /// Same contract as [`Self::get_or_compute_with_ttl`]; the lock is never
    /// held across the producer's `.await`.
    pub async fn get_or_compute_async<F, Fut, E>(
        &self,
        key: &str,
        ttl_seconds: u64,
        producer: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = producer().await?;
        self.set_with_ttl(key, value.clone(), ttl_seconds);
        Ok(value)
    }

    // == Invalidation ==
    /// Removes every key containing `pattern` as a literal substring.
    ///
    /// Returns the number of entries removed. An empty pattern matches
    /// every key.
    pub fn invalidate_matching(&self, pattern: &str) -> usize {
        let removed = {
            let mut table = self.table();
            let before = table.len();
            table.retain(|key, _| !key.contains(pattern));
            before - table.len()
        };

        info!(pattern, removed, "cache keys invalidated");
        removed
    }

    // == Purge Expired ==
    /// Removes all expired entries. Only runs when called.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        let removed = {
            let mut table = self.table();
            let before = table.len();
            table.retain(|_, entry| !entry.is_expired(now));
            before - table.len()
        };

        if removed > 0 {
            info!(removed, "purged expired cache entries");
        }
        removed
    }

    /// Remaining lifetime of `key` in whole seconds, `None` when absent or
    /// expired. Does not evict.
    pub fn ttl_remaining(&self, key: &str) -> Option<u64> {
        let now = self.clock.now_ms();
        self.table()
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl_remaining_ms(now) / 1000)
    }

    // == Length ==
    /// Number of entries physically present, expired ones included.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.table().is_empty()
    }
}

impl<V: Clone> Default for CacheStore<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}
