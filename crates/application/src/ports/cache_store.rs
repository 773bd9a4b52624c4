use async_trait::async_trait;
use cacheside_domain::{CacheKey, CacheStrategy, DomainError};

/// Single-key store with expiry. Payloads are opaque serialized pages.
///
/// Entries disappear only through their own TTL; callers never delete.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, DomainError>;

    async fn set_with_expiry(
        &self,
        key: &CacheKey,
        payload: String,
        ttl_seconds: u64,
    ) -> Result<(), DomainError>;

    fn strategy(&self) -> CacheStrategy;
}
