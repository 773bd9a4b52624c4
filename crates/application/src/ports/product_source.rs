use async_trait::async_trait;
use cacheside_domain::{DomainError, ProductSummary};

/// Authoritative, read-only product aggregate.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_page(&self, limit: u32, offset: u64) -> Result<Vec<ProductSummary>, DomainError>;
}
