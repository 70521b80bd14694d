//! Read cache with TTL and explicit invalidation
//!
//! `get_or_fetch` serves a fresh entry or runs the fetch and stores its
//! result. Errors are never cached. A fetch that started before an
//! `invalidate` of the same key does not store its (possibly stale) result;
//! other keys are unaffected.

use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// Per-key state. A slot outlives its entry once the key was invalidated,
/// so the generation survives until the next fetch reads it.
struct Slot<V> {
    entry: Option<CacheEntry<V>>,
    /// Bumped on every invalidation of this key; an absent slot is 0
    generation: u64,
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self {
            entry: None,
            generation: 0,
        }
    }
}

/// Cache shared across requests
pub struct TtlCache<K, V> {
    slots: Arc<DashMap<K, Slot<V>>>,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl<K: Eq + Hash, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
        }
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Fresh cached value, if any
    pub fn get(&self, key: &K) -> Option<V> {
        let slot = self.slots.get(key)?;
        slot.entry
            .as_ref()
            .filter(|e| e.expires_at > Instant::now())
            .map(|e| e.value.clone())
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, key: K, ttl: Duration, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        // No map guard may be held across the fetch
        let generation = match self.slots.get(&key) {
            Some(slot) => {
                if let Some(entry) = slot.entry.as_ref()
                    && entry.expires_at > Instant::now()
                {
                    return Ok(entry.value.clone());
                }
                slot.generation
            }
            None => 0,
        };

        let value = fetch().await?;

        let mut slot = self.slots.entry(key).or_default();
        if slot.generation == generation {
            slot.entry = Some(CacheEntry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            });
        }
        Ok(value)
    }

    pub fn invalidate(&self, key: &K) {
        let mut slot = self.slots.entry(key.clone()).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        slot.entry = None;
    }

    /// Drop expired entries; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;
        self.slots.retain(|_, slot| {
            if slot.entry.as_ref().is_some_and(|e| e.expires_at <= now) {
                slot.entry = None;
                purged += 1;
            }
            // Slots carrying a generation stay
            slot.entry.is_some() || slot.generation != 0
        });
        purged
    }

    /// Number of stored entries, fresh or not
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
