use crate::ports::{CacheStore, ProductSource};
use cacheside_domain::{
    CacheKey, CacheStrategy, DomainError, ProductSummary, QueryIdentity, RequestMetrics,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A served page and the metrics describing how it was served.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub metrics: RequestMetrics,
}

/// Snapshot of the cache feature flag for status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStatus {
    pub enabled: bool,
    pub strategy: CacheStrategy,
    pub ttl_seconds: u64,
}

/// Cache-aside read of one product page.
///
/// Concurrent misses for the same key are not coalesced: every caller
/// queries the source and rewrites the entry.
pub struct GetProductsUseCase {
    source: Arc<dyn ProductSource>,
    cache: Option<Arc<dyn CacheStore>>,
    cache_ttl_seconds: u64,
}

impl GetProductsUseCase {
    /// Source-only reads; the cache feature is off.
    pub fn new(source: Arc<dyn ProductSource>) -> Self {
        Self {
            source,
            cache: None,
            cache_ttl_seconds: 0,
        }
    }

    /// Turn the cache feature on with the given store and entry lifetime.
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>, ttl_seconds: u64) -> Self {
        self.cache = Some(cache);
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    pub fn cache_status(&self) -> CacheStatus {
        CacheStatus {
            enabled: self.cache.is_some(),
            strategy: self.strategy(),
            ttl_seconds: self.cache_ttl_seconds,
        }
    }

    fn strategy(&self) -> CacheStrategy {
        self.cache
            .as_ref()
            .map(|cache| cache.strategy())
            .unwrap_or(CacheStrategy::None)
    }

    pub async fn execute(&self, identity: QueryIdentity) -> Result<ProductPage, DomainError> {
        self.execute_since(identity, Instant::now()).await
    }

    /// Serves `identity`, measuring backend time from `accepted_at`.
    pub async fn execute_since(
        &self,
        identity: QueryIdentity,
        accepted_at: Instant,
    ) -> Result<ProductPage, DomainError> {
        let key = identity.cache_key();
        let strategy = self.strategy();

        if let Some(cache) = &self.cache {
            if let Some(products) = self.check_cache(cache.as_ref(), &key).await {
                let metrics = RequestMetrics::cache_hit(elapsed_ms(accepted_at), strategy);
                info!(
                    key = %key,
                    backend_ms = metrics.backend_processing_time_ms,
                    cache_hit = true,
                    "Request served"
                );
                return Ok(ProductPage { products, metrics });
            }
        }

        debug!(key = %key, "Querying source");
        let db_start = Instant::now();
        let products = self
            .source
            .fetch_page(identity.limit(), identity.offset())
            .await?;
        let db_time_ms = elapsed_ms(db_start);

        if let Some(cache) = &self.cache {
            self.populate_cache(Arc::clone(cache), key.clone(), &products);
        }

        let metrics = RequestMetrics::source_hit(elapsed_ms(accepted_at), db_time_ms, strategy);
        info!(
            key = %key,
            backend_ms = metrics.backend_processing_time_ms,
            db_ms = db_time_ms,
            cache_hit = false,
            "Request served"
        );

        Ok(ProductPage { products, metrics })
    }

    /// Cache errors and undecodable payloads are treated as misses.
    async fn check_cache(
        &self,
        cache: &dyn CacheStore,
        key: &CacheKey,
    ) -> Option<Vec<ProductSummary>> {
        match cache.get(key).await {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(products) => {
                    debug!(key = %key, "Cache HIT");
                    Some(products)
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => {
                debug!(key = %key, "Cache MISS");
                None
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache read failed, falling back to source");
                None
            }
        }
    }

    /// Writes the page back on a detached task. The outcome is only logged.
    fn populate_cache(&self, cache: Arc<dyn CacheStore>, key: CacheKey, products: &[ProductSummary]) {
        let payload = match serde_json::to_string(products) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to serialize page for cache");
                return;
            }
        };
        let ttl_seconds = self.cache_ttl_seconds;

        tokio::spawn(async move {
            match cache.set_with_expiry(&key, payload, ttl_seconds).await {
                Ok(()) => debug!(key = %key, ttl_seconds, "Cache SET"),
                Err(e) => warn!(key = %key, error = %e, "Cache write failed"),
            }
        });
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
