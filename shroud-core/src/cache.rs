// shroud-core/src/cache.rs
//! Result cache for processed text.
//!
//! Avoids re-running detection for text that was already processed. Keys are
//! SHA-256 digests of the exact input, so only byte-identical repeats hit.
//! Eviction is first-in-first-out: at capacity the oldest entry is discarded,
//! regardless of how recently it was read. Default: 1000 entries, 1-hour TTL.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use hex;
use log::debug;
use sha2::{Digest, Sha256};

use crate::config::CacheConfig;
use crate::errors::ShroudError;
use crate::findings::FindingSet;

pub const DEFAULT_MAX_ENTRIES: usize = 1000;
pub const DEFAULT_TTL_SECS: u64 = 3600;

/// Cached processing result with its insertion timestamp.
struct CacheEntry {
    masked_text: String,
    findings: FindingSet,
    inserted_at: Instant,
}

/// Thread-safe FIFO cache for processing results.
pub struct ResultCache {
    inner: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    order: VecDeque<String>,
    max_entries: usize,
    ttl: Option<Duration>,
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

impl ResultCache {
    /// Creates a cache with the given capacity and TTL. `None` disables
    /// expiry; a capacity of `0` stores nothing, so every lookup misses.
    pub fn new(max_entries: usize, ttl: Option<Duration>) -> Self {
        Self {
            inner: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_entries),
                order: VecDeque::with_capacity(max_entries),
                max_entries,
                ttl,
            }),
        }
    }

    /// Creates a cache from configuration, falling back to the defaults for
    /// unset fields. A configured TTL of `0` disables expiry; a configured
    /// capacity of `0` disables storage.
    pub fn from_config(config: &CacheConfig) -> Self {
        let max_entries = config.max_entries.unwrap_or(DEFAULT_MAX_ENTRIES);
        let ttl = match config.ttl_seconds.unwrap_or(DEFAULT_TTL_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self::new(max_entries, ttl)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, CacheInner>, ShroudError> {
        self.inner
            .lock()
            .map_err(|_| ShroudError::CacheUnavailable("result cache lock poisoned".to_string()))
    }

    /// Looks up the cached result for `text`. Returns `Ok(None)` on a miss or
    /// an expired entry.
    pub fn get(&self, text: &str) -> Result<Option<(String, FindingSet)>, ShroudError> {
        let key = hash_text(text);
        let mut inner = self.lock()?;

        let expired = match inner.entries.get(&key) {
            None => return Ok(None),
            Some(entry) => inner
                .ttl
                .map_or(false, |ttl| entry.inserted_at.elapsed() >= ttl),
        };

        if expired {
            inner.entries.remove(&key);
            inner.order.retain(|k| k != &key);
            debug!("Expired result cache entry removed.");
            return Ok(None);
        }

        let result = inner
            .entries
            .get(&key)
            .map(|entry| (entry.masked_text.clone(), entry.findings.clone()));
        Ok(result)
    }

    /// Stores the result for `text`, replacing any previous entry wholesale.
    pub fn put(&self, text: &str, masked_text: String, findings: FindingSet) -> Result<(), ShroudError> {
        let key = hash_text(text);
        let mut inner = self.lock()?;

        if inner.max_entries == 0 {
            return Ok(());
        }

        // If already present, replace and move to the back of the queue.
        if inner.entries.contains_key(&key) {
            inner.entries.insert(
                key.clone(),
                CacheEntry {
                    masked_text,
                    findings,
                    inserted_at: Instant::now(),
                },
            );
            inner.order.retain(|k| k != &key);
            inner.order.push_back(key);
            return Ok(());
        }

        // Evict oldest entries while at capacity.
        while inner.entries.len() >= inner.max_entries && !inner.order.is_empty() {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }

        inner.order.push_back(key.clone());
        inner.entries.insert(
            key,
            CacheEntry {
                masked_text,
                findings,
                inserted_at: Instant::now(),
            },
        );
        Ok(())
    }

    /// Number of entries in the cache.
    pub fn len(&self) -> Result<usize, ShroudError> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, ShroudError> {
        Ok(self.len()? == 0)
    }

    /// Clear all entries.
    pub fn clear(&self) -> Result<(), ShroudError> {
        let mut inner = self.lock()?;
        inner.entries.clear();
        inner.order.clear();
        Ok(())
    }
}
