//! Configuration module for Cacheside
//!
//! This module contains all configuration structures organized by concern:
//! - `root`: Main configuration, environment and CLI overrides
//! - `server`: HTTP bind address, port and CORS
//! - `database`: Authoritative source connection
//! - `cache`: Cache feature flag, backend and TTL
//! - `logging`: Logging settings
//! - `bench`: Benchmark target, repetitions and scenario matrix
//! - `errors`: Configuration errors

pub mod bench;
pub mod cache;
pub mod database;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;

pub use bench::BenchConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use database::DatabaseConfig;
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
