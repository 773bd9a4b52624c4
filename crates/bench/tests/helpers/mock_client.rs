#![allow(dead_code)]

use async_trait::async_trait;
use cacheside_bench::{BenchError, ProductsClient};
use cacheside_domain::{CacheStrategy, RequestMetrics, ScenarioSpec};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// Behaves like the products endpoint with a cache in front: the first
/// request per scenario misses and later ones hit, unless the call number
/// is listed as failing.
pub struct ScriptedClient {
    strategy: CacheStrategy,
    cache_enabled: bool,
    failing_calls: HashSet<u32>,
    calls: AtomicU32,
    warmed: Mutex<HashSet<ScenarioSpec>>,
    requested: Mutex<Vec<ScenarioSpec>>,
}

impl ScriptedClient {
    pub fn cached(strategy: CacheStrategy) -> Self {
        Self {
            strategy,
            cache_enabled: true,
            failing_calls: HashSet::new(),
            calls: AtomicU32::new(0),
            warmed: Mutex::new(HashSet::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn uncached() -> Self {
        Self {
            cache_enabled: false,
            ..Self::cached(CacheStrategy::None)
        }
    }

    /// 1-based global call numbers that answer with HTTP 500.
    pub fn failing_on(mut self, calls: impl IntoIterator<Item = u32>) -> Self {
        self.failing_calls = calls.into_iter().collect();
        self
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<ScenarioSpec> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductsClient for ScriptedClient {
    async fn fetch(&self, spec: &ScenarioSpec) -> Result<RequestMetrics, BenchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.requested.lock().unwrap().push(*spec);

        if self.failing_calls.contains(&call) {
            return Err(BenchError::Http {
                status: 500,
                reason: "Internal Server Error".to_string(),
            });
        }

        let base = spec.limit as f64 / 10.0;
        if self.cache_enabled && !self.warmed.lock().unwrap().insert(*spec) {
            return Ok(RequestMetrics::cache_hit(base * 0.25, self.strategy));
        }
        Ok(RequestMetrics::source_hit(base + 1.0, base, self.strategy))
    }
}
