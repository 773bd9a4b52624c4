use crate::{
    dto::{HealthConfig, HealthResponse},
    state::AppState,
};
use axum::{extract::State, Json};
use tracing::debug;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = state.get_products.cache_status();
    debug!(cache_enabled = status.enabled, "Health check requested");

    Json(HealthResponse {
        status: "ok",
        config: HealthConfig {
            redis_cache: if status.enabled { "on" } else { "off" },
            cache_enabled: status.enabled,
            cache_strategy: status.strategy.label(),
            ttl_seconds: status.ttl_seconds,
        },
    })
}
