//! Generic memoizing cache with per-entry expiry
//!
//! Keyed by content id, each entry lives for a fixed TTL. Writers call
//! [`TtlCache::invalidate`] with the fresh value (or `None` to drop it) and
//! every subscriber receives a [`CacheEvent`].

use dashmap::DashMap;
use serde::Serialize;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

use crate::shared::errors::AppResult;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// Notification sent to subscribers when a key is invalidated
#[derive(Debug, Clone, PartialEq)]
pub enum CacheEvent<K, V> {
    Updated { key: K, value: V },
    Removed { key: K },
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            self.hits as f64 / (self.hits + self.misses) as f64
        }
    }
}

pub struct TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    entries: DashMap<K, CacheEntry<V>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    events: broadcast::Sender<CacheEvent<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            entries: DashMap::new(),
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            events,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached value if present and fresh; expired entries are dropped
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(self.ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
        }

        // Guard from `get` must be released before removing
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired(self.ttl))
            .is_some()
        {
            log::debug!("Removed expired cache entry for key: {:?}", key);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    /// Memoize `fetch` for `key`. Failures are not cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> AppResult<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<V>>,
    {
        if let Some(value) = self.get(&key) {
            log::debug!("Cache HIT for {:?}", key);
            return Ok(value);
        }

        log::debug!("Cache MISS for {:?}", key);
        let value = fetch().await?;
        self.insert(key, value.clone());
        Ok(value)
    }

    /// Replace (or drop, with `None`) the entry for `key` and notify subscribers
    pub fn invalidate(&self, key: K, new_value: Option<V>) {
        let event = match new_value {
            Some(value) => {
                self.insert(key.clone(), value.clone());
                CacheEvent::Updated { key, value }
            }
            None => {
                self.entries.remove(&key);
                CacheEvent::Removed { key }
            }
        };

        // No receivers is not an error
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent<K, V>> {
        self.events.subscribe()
    }

    /// Remove every expired entry; returns the number removed
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before.saturating_sub(self.entries.len())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
