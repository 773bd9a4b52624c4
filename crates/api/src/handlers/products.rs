use crate::{
    dto::{ErrorResponse, ProductsQuery, ProductsResponse},
    middleware::RequestStart,
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::{Extensions, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use cacheside_domain::QueryIdentity;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Query pairs are taken as a plain list so repeated or unknown keys never
/// turn into an extractor rejection; every response is a JSON envelope.
#[instrument(skip(state, extensions), name = "api_get_products")]
pub async fn get_products(
    State(state): State<AppState>,
    extensions: Extensions,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = ProductsQuery::from_pairs(&pairs);
    let accepted_at = extensions
        .get::<RequestStart>()
        .map(|start| start.0)
        .unwrap_or_else(Instant::now);
    let identity = QueryIdentity::from_request(params.page.as_deref(), params.limit.as_deref());

    match state.get_products.execute_since(identity, accepted_at).await {
        Ok(page) => {
            info!(
                backend_ms = page.metrics.backend_processing_time_ms,
                cache_hit = page.metrics.cache_hit,
                rows = page.products.len(),
                "Products served"
            );
            (StatusCode::OK, Json(ProductsResponse::from(page))).into_response()
        }
        Err(e) => {
            error!(key = %identity.cache_key(), error = %e, "Failed to serve products");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            )
                .into_response()
        }
    }
}
