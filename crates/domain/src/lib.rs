//! Cacheside Domain Layer
pub mod config;
pub mod errors;
pub mod metrics;
pub mod products;
pub mod scenario;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use metrics::{CacheStrategy, RequestMetrics};
pub use products::{CacheKey, ProductSummary, QueryIdentity, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use scenario::ScenarioSpec;
