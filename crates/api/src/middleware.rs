use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{debug, info};

/// When the server accepted the request; backend processing time is
/// measured from here.
#[derive(Debug, Clone, Copy)]
pub struct RequestStart(pub Instant);

pub async fn track_request(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    info!(method = %request.method(), uri = %request.uri(), "Incoming request");
    request.extensions_mut().insert(RequestStart(start));

    let response = next.run(request).await;

    debug!(
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Request completed"
    );
    response
}

/// Responses describe live cache behaviour and must never be cached by
/// intermediaries.
pub fn no_store_layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))
}

/// `["*"]` or an empty list allows every origin.
pub fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.is_empty() || allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
