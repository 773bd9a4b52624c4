use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which cache, if any, sits in front of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheStrategy {
    None,
    RedisOnly,
    InMemoryOnly,
}

impl CacheStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            CacheStrategy::None => "None",
            CacheStrategy::RedisOnly => "Redis Only",
            CacheStrategy::InMemoryOnly => "In-Memory Only",
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-request timings reported alongside every served page.
///
/// `db_time_ms` is `None` when the cache answered the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetrics {
    pub backend_processing_time_ms: f64,
    pub db_time_ms: Option<f64>,
    pub cache_hit: bool,
    pub cache_strategy_label: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestMetrics {
    pub fn cache_hit(backend_processing_time_ms: f64, strategy: CacheStrategy) -> Self {
        Self {
            backend_processing_time_ms,
            db_time_ms: None,
            cache_hit: true,
            cache_strategy_label: strategy.label().to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn source_hit(
        backend_processing_time_ms: f64,
        db_time_ms: f64,
        strategy: CacheStrategy,
    ) -> Self {
        Self {
            backend_processing_time_ms,
            db_time_ms: Some(db_time_ms),
            cache_hit: false,
            cache_strategy_label: strategy.label().to_string(),
            timestamp: Utc::now(),
        }
    }
}
