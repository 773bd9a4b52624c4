//! Cache-aside flow over real HTTP
//!
//! Request → cache check → SQLite aggregate on miss → background write →
//! cache hit on the next identical request.

#[path = "../common/mod.rs"]
mod common;

use common::{TestServer, TestServerBuilder, SEEDED_PRODUCTS};
use serde_json::Value;

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.expect("request failed");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("body is not JSON");
    (status, body)
}

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .expect("data is not an array")
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_miss_then_hit_with_memory_cache() {
    let server = TestServerBuilder::new().with_memory_cache().build().await;
    let url = server.url("/api/products?page=1&limit=10");

    let (status, first) = get_json(&url).await;
    assert_eq!(status, 200);
    assert_eq!(first["success"], true);
    assert_eq!(first["metrics"]["cacheHit"], false);
    assert!(first["metrics"]["dbTimeMs"].is_number());
    assert_eq!(first["metrics"]["cacheStrategyLabel"], "In-Memory Only");

    server.wait_for_cached_entries(1).await;

    let (_, second) = get_json(&url).await;
    assert_eq!(second["metrics"]["cacheHit"], true);
    assert!(second["metrics"]["dbTimeMs"].is_null());
    assert_eq!(second["data"], first["data"]);
    assert_eq!(server.source_calls(), 1);

    server.shutdown();
}

#[tokio::test]
async fn test_pages_are_one_based_and_cached_independently() {
    let server = TestServerBuilder::new().with_memory_cache().build().await;

    let (_, page1) = get_json(&server.url("/api/products?page=1&limit=10")).await;
    let (_, page2) = get_json(&server.url("/api/products?page=2&limit=10")).await;

    assert_eq!(ids(&page1), (1..=10).collect::<Vec<_>>());
    assert_eq!(ids(&page2), (11..=20).collect::<Vec<_>>());

    // Product 11 carries one order item fanned out over two reviews.
    let eleven = &page2["data"][0];
    assert_eq!(eleven["total_orders"], 2);
    assert_eq!(eleven["avg_rating"], 4.0);
    assert_eq!(eleven["stock"], 22);

    server.wait_for_cached_entries(2).await;
    assert_eq!(server.source_calls(), 2);
}

#[tokio::test]
async fn test_page_past_the_end_is_empty() {
    let server = TestServer::start().await;
    let last_page = SEEDED_PRODUCTS / 100 + 2;

    let (status, body) =
        get_json(&server.url(&format!("/products?page={}&limit=100", last_page))).await;

    assert_eq!(status, 200);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_parameters_fall_back_to_defaults() {
    let server = TestServer::start().await;

    let (status, body) = get_json(&server.url("/api/products?page=zero&limit=-3")).await;

    assert_eq!(status, 200);
    assert_eq!(ids(&body), (1..=50).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_cache_disabled_reads_source_every_time() {
    let server = TestServer::start().await;
    let url = server.products_url();

    for _ in 0..3 {
        let (_, body) = get_json(&url).await;
        assert_eq!(body["metrics"]["cacheHit"], false);
        assert_eq!(body["metrics"]["cacheStrategyLabel"], "None");
    }
    assert_eq!(server.source_calls(), 3);
}

#[tokio::test]
async fn test_unreachable_redis_fails_open() {
    let server = TestServerBuilder::new()
        .with_redis_cache("redis://127.0.0.1:1")
        .build()
        .await;
    let url = server.url("/api/products?page=1&limit=5");

    for _ in 0..2 {
        let (status, body) = get_json(&url).await;
        assert_eq!(status, 200);
        assert_eq!(body["metrics"]["cacheHit"], false);
        assert_eq!(body["metrics"]["cacheStrategyLabel"], "Redis Only");
        assert_eq!(ids(&body).len(), 5);
    }
    assert_eq!(server.source_calls(), 2);
}

#[tokio::test]
async fn test_health_reports_cache_configuration() {
    let server = TestServerBuilder::new()
        .with_memory_cache()
        .with_ttl(30)
        .build()
        .await;

    let (status, body) = get_json(&server.url("/api/health")).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["config"]["redisCache"], "on");
    assert_eq!(body["config"]["cacheStrategy"], "In-Memory Only");
    assert_eq!(body["config"]["ttlSeconds"], 30);
}

#[tokio::test]
async fn test_responses_are_never_cacheable_by_clients() {
    let server = TestServer::start().await;

    let response = reqwest::get(server.products_url()).await.unwrap();

    assert_eq!(
        response.headers().get("cache-control").unwrap(),
        "no-store"
    );
}
