use async_trait::async_trait;
use cacheside_application::ports::CacheStore;
use cacheside_domain::{CacheKey, CacheStrategy, DomainError};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

struct MemoryEntry {
    payload: Arc<str>,
    expires_at: Instant,
}

impl MemoryEntry {
    #[inline]
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct MemoryCacheMetrics {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub insertions: AtomicU64,
    pub expirations: AtomicU64,
}

impl MemoryCacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed) as f64;
        let misses = self.misses.load(Ordering::Relaxed) as f64;
        let total = hits + misses;
        if total > 0.0 {
            (hits / total) * 100.0
        } else {
            0.0
        }
    }
}

/// Process-local TTL store.
///
/// Expired entries are dropped lazily on read and by [`purge_expired`].
///
/// [`purge_expired`]: InMemoryCacheStore::purge_expired
pub struct InMemoryCacheStore {
    entries: DashMap<String, MemoryEntry>,
    metrics: MemoryCacheMetrics,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            metrics: MemoryCacheMetrics::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> &MemoryCacheMetrics {
        &self.metrics
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            self.metrics
                .expirations
                .fetch_add(removed as u64, Ordering::Relaxed);
            debug!(removed, remaining = self.entries.len(), "Purged expired cache entries");
        }
        removed
    }

    /// Periodically purges expired entries until the store is dropped by
    /// every other owner.
    pub fn start_purge_task(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match store.upgrade() {
                    Some(store) => {
                        store.purge_expired();
                    }
                    None => break,
                }
            }
        })
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, DomainError> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key.as_str()) {
            if !entry.is_expired(now) {
                self.metrics.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.payload.to_string()));
            }
        }

        // The read guard above is released before removing.
        if self
            .entries
            .remove_if(key.as_str(), |_, entry| entry.is_expired(now))
            .is_some()
        {
            self.metrics.expirations.fetch_add(1, Ordering::Relaxed);
        }
        self.metrics.misses.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    async fn set_with_expiry(
        &self,
        key: &CacheKey,
        payload: String,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let entry = MemoryEntry {
            payload: Arc::from(payload),
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        };
        self.entries.insert(key.to_string(), entry);
        self.metrics.insertions.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::InMemoryOnly
    }
}
