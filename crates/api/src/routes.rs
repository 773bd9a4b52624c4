use crate::handlers;
use crate::middleware::{build_cors_layer, no_store_layer, track_request};
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

/// Products and health routes with state
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(handlers::get_products))
        .route("/health", get(handlers::health_check))
        .with_state(state)
}

/// Full HTTP surface: routes under `/api` and at the root, with CORS,
/// `cache-control: no-store` and request tracking.
pub fn create_app(state: AppState, cors_allowed_origins: &[String]) -> Router {
    let api = create_api_routes(state);

    Router::new()
        .nest("/api", api.clone())
        .merge(api)
        .layer(no_store_layer())
        .layer(build_cors_layer(cors_allowed_origins))
        .layer(middleware::from_fn(track_request))
}
