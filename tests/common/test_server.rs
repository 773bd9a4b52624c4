use super::fixtures::{seeded_pool, CountingSource};
use cacheside_api::{create_app, AppState};
use cacheside_application::ports::CacheStore;
use cacheside_application::use_cases::GetProductsUseCase;
use cacheside_infrastructure::{InMemoryCacheStore, RedisCacheStore};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// The full HTTP stack on an ephemeral port, backed by a seeded SQLite
/// database.
pub struct TestServer {
    addr: SocketAddr,
    source_calls: Arc<AtomicU64>,
    memory_store: Option<Arc<InMemoryCacheStore>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        TestServerBuilder::new().build().await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn products_url(&self) -> String {
        format!("http://{}/api/products", self.addr)
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    pub fn source_calls(&self) -> u64 {
        self.source_calls.load(Ordering::SeqCst)
    }

    /// Waits until the in-memory cache holds `count` entries.
    pub async fn wait_for_cached_entries(&self, count: usize) {
        let store = self
            .memory_store
            .as_ref()
            .expect("server was not built with the in-memory cache");

        for _ in 0..200 {
            if store.len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("cache never reached {} entries", count);
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

enum CacheChoice {
    Disabled,
    Memory,
    Redis(String),
}

pub struct TestServerBuilder {
    cache: CacheChoice,
    ttl_seconds: u64,
}

impl TestServerBuilder {
    pub fn new() -> Self {
        Self {
            cache: CacheChoice::Disabled,
            ttl_seconds: 60,
        }
    }

    pub fn with_memory_cache(mut self) -> Self {
        self.cache = CacheChoice::Memory;
        self
    }

    pub fn with_redis_cache(mut self, url: &str) -> Self {
        self.cache = CacheChoice::Redis(url.to_string());
        self
    }

    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    pub async fn build(self) -> TestServer {
        let source = CountingSource::new(seeded_pool().await);
        let source_calls = source.counter();
        let mut use_case = GetProductsUseCase::new(Arc::new(source));

        let mut memory_store = None;
        let store: Option<Arc<dyn CacheStore>> = match self.cache {
            CacheChoice::Disabled => None,
            CacheChoice::Memory => {
                let store = Arc::new(InMemoryCacheStore::new());
                memory_store = Some(Arc::clone(&store));
                Some(store)
            }
            CacheChoice::Redis(url) => Some(Arc::new(
                RedisCacheStore::new(&url).expect("invalid redis url"),
            )),
        };
        if let Some(store) = store {
            use_case = use_case.with_cache(store, self.ttl_seconds);
        }

        let app = create_app(
            AppState::new(Arc::new(use_case)),
            &["*".to_string()],
        );

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        TestServer {
            addr,
            source_calls,
            memory_store,
            shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Default for TestServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
