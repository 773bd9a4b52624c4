#![allow(dead_code)]

use async_trait::async_trait;
use cacheside_application::ports::{CacheStore, ProductSource};
use cacheside_domain::{CacheKey, CacheStrategy, DomainError, ProductSummary};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

// ============================================================================
// Mock ProductSource
// ============================================================================

pub struct MockProductSource {
    total_rows: i64,
    latency: Duration,
    call_count: Arc<AtomicU64>,
    calls: Arc<RwLock<Vec<(u32, u64)>>>,
    should_fail: Arc<RwLock<bool>>,
}

impl MockProductSource {
    pub fn new(total_rows: i64) -> Self {
        Self {
            total_rows,
            latency: Duration::ZERO,
            call_count: Arc::new(AtomicU64::new(0)),
            calls: Arc::new(RwLock::new(Vec::new())),
            should_fail: Arc::new(RwLock::new(false)),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn calls(&self) -> Vec<(u32, u64)> {
        self.calls.read().await.clone()
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }
}

pub fn make_product(id: i64) -> ProductSummary {
    ProductSummary {
        id,
        name: format!("Product {}", id),
        category: if id % 7 == 0 {
            None
        } else {
            Some(format!("Category {}", id % 10))
        },
        total_orders: id * 3,
        avg_rating: (id % 5) as f64 + 0.37,
        stock: 100 - (id % 100),
    }
}

#[async_trait]
impl ProductSource for MockProductSource {
    async fn fetch_page(&self, limit: u32, offset: u64) -> Result<Vec<ProductSummary>, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls.write().await.push((limit, offset));

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if *self.should_fail.read().await {
            return Err(DomainError::SourceUnavailable("connection refused".to_string()));
        }

        let start = offset as i64 + 1;
        let end = (offset as i64 + i64::from(limit)).min(self.total_rows);
        Ok((start..=end).map(make_product).collect())
    }
}

// ============================================================================
// Mock CacheStore
// ============================================================================

pub struct MockCacheStore {
    entries: Arc<RwLock<HashMap<String, (String, Instant)>>>,
    get_count: Arc<AtomicU64>,
    set_count: Arc<AtomicU64>,
    fail_get: Arc<RwLock<bool>>,
    fail_set: Arc<RwLock<bool>>,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            get_count: Arc::new(AtomicU64::new(0)),
            set_count: Arc::new(AtomicU64::new(0)),
            fail_get: Arc::new(RwLock::new(false)),
            fail_set: Arc::new(RwLock::new(false)),
        }
    }

    pub fn get_count(&self) -> u64 {
        self.get_count.load(Ordering::Relaxed)
    }

    pub fn set_count(&self) -> u64 {
        self.set_count.load(Ordering::Relaxed)
    }

    pub async fn set_fail_get(&self, fail: bool) {
        *self.fail_get.write().await = fail;
    }

    pub async fn set_fail_set(&self, fail: bool) {
        *self.fail_set.write().await = fail;
    }

    pub async fn insert_raw(&self, key: &str, payload: &str, ttl: Duration) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), (payload.to_string(), Instant::now() + ttl));
    }

    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).map(|(p, _)| p.clone())
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Polls until the detached write for `key` has landed.
    pub async fn wait_for_key(&self, key: &str) {
        for _ in 0..1_000 {
            if self.contains(key).await {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("cache entry {key} was never written");
    }
}

#[async_trait]
impl CacheStore for MockCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, DomainError> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        if *self.fail_get.read().await {
            return Err(DomainError::CacheUnavailable("connection reset".to_string()));
        }

        let entries = self.entries.read().await;
        Ok(entries
            .get(key.as_str())
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(payload, _)| payload.clone()))
    }

    async fn set_with_expiry(
        &self,
        key: &CacheKey,
        payload: String,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        if *self.fail_set.read().await {
            return Err(DomainError::CacheUnavailable("READONLY replica".to_string()));
        }

        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .write()
            .await
            .insert(key.to_string(), (payload, expires_at));
        Ok(())
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::RedisOnly
    }
}
