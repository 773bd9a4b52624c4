use cacheside_application::ports::CacheStore;
use cacheside_domain::config::{CacheBackend, CacheConfig};
use cacheside_infrastructure::{InMemoryCacheStore, RedisCacheStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const PURGE_INTERVAL: Duration = Duration::from_secs(30);

/// Builds the configured store, or `None` when caching is off.
///
/// An unreachable Redis is not fatal: the service starts and every cache
/// call fails open until the server comes back.
pub async fn init_cache(cfg: &CacheConfig) -> anyhow::Result<Option<Arc<dyn CacheStore>>> {
    if !cfg.enabled {
        info!("Cache disabled, every request reads the database");
        return Ok(None);
    }

    let store: Arc<dyn CacheStore> = match cfg.backend {
        CacheBackend::Redis => {
            let store = RedisCacheStore::new(&cfg.redis_url)?;
            if let Err(e) = store.connect().await {
                warn!(url = %cfg.redis_url, error = %e, "Redis unreachable, serving from database until it recovers");
            }
            Arc::new(store)
        }
        CacheBackend::Memory => {
            let store = Arc::new(InMemoryCacheStore::new());
            store.start_purge_task(PURGE_INTERVAL);
            store
        }
    };

    info!(
        strategy = %store.strategy(),
        ttl_seconds = cfg.ttl_seconds,
        "Cache enabled"
    );

    Ok(Some(store))
}
