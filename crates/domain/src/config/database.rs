use serde::{Deserialize, Serialize};

/// Authoritative product store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URL (default: "sqlite://./cacheside.db")
    #[serde(default = "default_url")]
    pub url: String,

    /// Maximum pooled connections (default: 16)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Directory holding the schema migrations (default: "./migrations")
    #[serde(default = "default_migrations_path")]
    pub migrations_path: String,

    /// Apply pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            migrations_path: default_migrations_path(),
            run_migrations: true,
        }
    }
}

fn default_url() -> String {
    "sqlite://./cacheside.db".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_migrations_path() -> String {
    "./migrations".to_string()
}

fn default_true() -> bool {
    true
}
