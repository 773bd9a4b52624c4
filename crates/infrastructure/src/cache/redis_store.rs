use async_trait::async_trait;
use cacheside_application::ports::CacheStore;
use cacheside_domain::{CacheKey, CacheStrategy, DomainError};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const COMMAND_TIMEOUT: Duration = Duration::from_secs(1);

enum ConnectionSlot {
    Idle,
    Connecting,
    Ready(MultiplexedConnection),
}

fn lock(slot: &Mutex<ConnectionSlot>) -> MutexGuard<'_, ConnectionSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a connect in flight; puts the slot back to idle if the attempt is
/// dropped before finishing.
struct ConnectAttempt<'a> {
    slot: &'a Mutex<ConnectionSlot>,
    finished: bool,
}

impl ConnectAttempt<'_> {
    fn finish(mut self, connection: Option<MultiplexedConnection>) {
        *lock(self.slot) = match connection {
            Some(conn) => ConnectionSlot::Ready(conn),
            None => ConnectionSlot::Idle,
        };
        self.finished = true;
    }
}

impl Drop for ConnectAttempt<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.slot) = ConnectionSlot::Idle;
        }
    }
}

/// Redis-backed store using `GET` and `SETEX`.
///
/// The connection is opened lazily and reopened after it drops, so an
/// unreachable server surfaces as [`DomainError::CacheUnavailable`] per call
/// instead of failing startup. Only one caller connects at a time; others
/// get `CacheUnavailable` right away instead of queueing. Every command is
/// bounded by a response timeout.
pub struct RedisCacheStore {
    client: Client,
    slot: Mutex<ConnectionSlot>,
    connect_timeout: Duration,
    command_timeout: Duration,
}

impl RedisCacheStore {
    /// Parses `url`; no network traffic happens until the first command.
    pub fn new(url: &str) -> Result<Self, DomainError> {
        let client = Client::open(url).map_err(|e| {
            DomainError::CacheUnavailable(format!("invalid redis url '{}': {}", url, e))
        })?;

        Ok(Self {
            client,
            slot: Mutex::new(ConnectionSlot::Idle),
            connect_timeout: CONNECT_TIMEOUT,
            command_timeout: COMMAND_TIMEOUT,
        })
    }

    pub fn with_timeouts(mut self, connect: Duration, command: Duration) -> Self {
        self.connect_timeout = connect;
        self.command_timeout = command;
        self
    }

    /// Opens the connection eagerly. Failure is reported, not fatal: later
    /// commands retry.
    pub async fn connect(&self) -> Result<(), DomainError> {
        self.connection().await.map(|_| ())
    }

    async fn connection(&self) -> Result<MultiplexedConnection, DomainError> {
        {
            let mut slot = lock(&self.slot);
            match &*slot {
                ConnectionSlot::Ready(conn) => return Ok(conn.clone()),
                ConnectionSlot::Connecting => {
                    return Err(DomainError::CacheUnavailable(
                        "redis connection in progress".to_string(),
                    ))
                }
                ConnectionSlot::Idle => {}
            }
            *slot = ConnectionSlot::Connecting;
        }

        let attempt = ConnectAttempt {
            slot: &self.slot,
            finished: false,
        };
        let result = match timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(to_cache_error(e)),
            Err(_) => Err(DomainError::CacheUnavailable(
                "redis connect timed out".to_string(),
            )),
        };

        match result {
            Ok(conn) => {
                attempt.finish(Some(conn.clone()));
                info!("Connected to Redis");
                Ok(conn)
            }
            Err(e) => {
                attempt.finish(None);
                Err(e)
            }
        }
    }

    /// Drops an established connection so the next call reconnects.
    fn reset(&self) {
        let mut slot = lock(&self.slot);
        if matches!(*slot, ConnectionSlot::Ready(_)) {
            *slot = ConnectionSlot::Idle;
        }
    }

    async fn run<T, F>(&self, command: &'static str, request: F) -> Result<T, DomainError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.command_timeout, request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(self.on_error(e)),
            Err(_) => {
                warn!(command, "Redis command timed out, reconnecting on next command");
                self.reset();
                Err(DomainError::CacheUnavailable(format!(
                    "redis {} timed out",
                    command
                )))
            }
        }
    }

    fn on_error(&self, e: RedisError) -> DomainError {
        if e.is_connection_dropped() || e.is_io_error() || e.is_timeout() {
            warn!(error = %e, "Redis connection lost, reconnecting on next command");
            self.reset();
        }
        to_cache_error(e)
    }
}

fn to_cache_error(e: RedisError) -> DomainError {
    DomainError::CacheUnavailable(e.to_string())
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, DomainError> {
        let mut conn = self.connection().await?;
        self.run("GET", conn.get::<_, Option<String>>(key.as_str()))
            .await
    }

    async fn set_with_expiry(
        &self,
        key: &CacheKey,
        payload: String,
        ttl_seconds: u64,
    ) -> Result<(), DomainError> {
        let mut conn = self.connection().await?;
        self.run(
            "SETEX",
            conn.set_ex::<_, _, ()>(key.as_str(), payload, ttl_seconds),
        )
        .await
    }

    fn strategy(&self) -> CacheStrategy {
        CacheStrategy::RedisOnly
    }
}
