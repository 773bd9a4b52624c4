use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl DomainError {
    /// Errors that must never fail a request on their own.
    pub fn is_cache_error(&self) -> bool {
        matches!(self, DomainError::CacheUnavailable(_))
    }
}
