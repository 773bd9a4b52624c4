use crate::CacheStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cache store selected when caching is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    Redis,
    Memory,
}

impl CacheBackend {
    pub fn strategy(&self) -> CacheStrategy {
        match self {
            CacheBackend::Redis => CacheStrategy::RedisOnly,
            CacheBackend::Memory => CacheStrategy::InMemoryOnly,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheBackend::Redis => "redis",
            CacheBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(CacheBackend::Redis),
            "memory" => Ok(CacheBackend::Memory),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Cache-aside configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Feature flag; when off every request goes to the source (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Backing store (default: redis)
    #[serde(default = "default_backend")]
    pub backend: CacheBackend,

    /// Redis connection URL (default: "redis://127.0.0.1:6379")
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Entry lifetime in seconds (default: 60)
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl CacheConfig {
    pub fn strategy(&self) -> CacheStrategy {
        if self.enabled {
            self.backend.strategy()
        } else {
            CacheStrategy::None
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            backend: default_backend(),
            redis_url: default_redis_url(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_backend() -> CacheBackend {
    CacheBackend::Redis
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_ttl_seconds() -> u64 {
    60
}
