use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: &'static str,
    pub config: HealthConfig,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HealthConfig {
    /// "on" or "off"
    pub redis_cache: &'static str,
    pub cache_enabled: bool,
    pub cache_strategy: &'static str,
    pub ttl_seconds: u64,
}
