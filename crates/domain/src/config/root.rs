use super::{
    BenchConfig, CacheBackend, CacheConfig, ConfigError, DatabaseConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub bench: BenchConfig,
}

/// Values supplied on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub cache_enabled: Option<bool>,
    pub cache_backend: Option<CacheBackend>,
    pub cache_ttl: Option<u64>,
    pub log_level: Option<String>,
    pub bench_base_url: Option<String>,
    pub bench_runs: Option<u32>,
    pub bench_output_dir: Option<String>,
}

impl Config {
    /// Loads configuration in precedence order: defaults, TOML file,
    /// process environment, then CLI overrides.
    pub fn load(config_path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new("cacheside.toml").exists() => Self::from_file("cacheside.toml")?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli_overrides(cli_overrides);

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies environment-level settings through `lookup` so tests can
    /// supply a fake environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_env("PORT", &port)?;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        if let Some(flag) = lookup("REDIS_CACHE") {
            self.cache.enabled = flag.trim().eq_ignore_ascii_case("on");
        }

        if let Some(backend) = lookup("CACHE_BACKEND") {
            self.cache.backend = backend.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CACHE_BACKEND".to_string(),
                value: backend.clone(),
            })?;
        }

        if let Some(url) = lookup("REDIS_URL") {
            self.cache.redis_url = url;
        } else if let Some(host) = lookup("REDIS_HOST") {
            let port = lookup("REDIS_PORT").unwrap_or_else(|| "6379".to_string());
            self.cache.redis_url = format!("redis://{}:{}", host, port);
        }

        // CACHE_TTL wins over the legacy TTL variable.
        if let Some(ttl) = lookup("CACHE_TTL") {
            self.cache.ttl_seconds = parse_env("CACHE_TTL", &ttl)?;
        } else if let Some(ttl) = lookup("TTL") {
            self.cache.ttl_seconds = parse_env("TTL", &ttl)?;
        }

        if let Some(url) = lookup("BENCH_API_URL") {
            self.bench.base_url = url;
        }

        if let Some(dir) = lookup("BENCH_OUTPUT_DIR") {
            self.bench.output_dir = dir;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.trim().to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT".to_string(),
                        value: format,
                    })
                }
            };
        }

        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }
        if let Some(enabled) = overrides.cache_enabled {
            self.cache.enabled = enabled;
        }
        if let Some(backend) = overrides.cache_backend {
            self.cache.backend = backend;
        }
        if let Some(ttl) = overrides.cache_ttl {
            self.cache.ttl_seconds = ttl;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.bench_base_url {
            self.bench.base_url = url;
        }
        if let Some(runs) = overrides.bench_runs {
            self.bench.runs = runs;
        }
        if let Some(dir) = overrides.bench_output_dir {
            self.bench.output_dir = dir;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_seconds == 0 {
            return Err(ConfigError::Validation(
                "cache.ttl_seconds must be a positive number of seconds".to_string(),
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        if self.bench.runs == 0 {
            return Err(ConfigError::Validation("bench.runs must be at least 1".to_string()));
        }

        if self.bench.scenarios.is_empty() {
            return Err(ConfigError::Validation(
                "bench.scenarios must declare at least one scenario".to_string(),
            ));
        }

        if let Some(bad) = self
            .bench
            .scenarios
            .iter()
            .find(|s| s.page == 0 || s.limit == 0)
        {
            return Err(ConfigError::Validation(format!(
                "bench scenario ({}) must use a 1-based page and a positive limit",
                bad
            )));
        }

        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}
