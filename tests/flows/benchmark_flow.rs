//! Benchmark harness against a live service
//!
//! Engine → HTTP client → products endpoint → report files on disk.

#[path = "../common/mod.rs"]
mod common;

use cacheside_bench::report::{scenario_file_name, SUMMARY_FILE_NAME};
use cacheside_bench::{BenchmarkEngine, HttpProductsClient, ScenarioRunner};
use cacheside_domain::ScenarioSpec;
use common::{TestServer, TestServerBuilder};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn engine_for(server: &TestServer, scenarios: Vec<ScenarioSpec>, runs: u32, dir: &TempDir) -> BenchmarkEngine {
    let client = Arc::new(HttpProductsClient::new(server.products_url()).unwrap());
    let runner = ScenarioRunner::new(client).with_delay(Duration::from_millis(25));
    BenchmarkEngine::new(runner, scenarios, runs, dir.path())
}

#[tokio::test]
async fn test_twenty_runs_against_memory_cache_hit_95_percent() {
    let server = TestServerBuilder::new()
        .with_memory_cache()
        .with_ttl(60)
        .build()
        .await;
    let out = TempDir::new().unwrap();

    let outcome = engine_for(&server, vec![ScenarioSpec::new(1, 10)], 20, &out)
        .run()
        .await
        .unwrap();

    assert_eq!(server.source_calls(), 1);
    let row = &outcome.rows[0];
    assert_eq!(row.successful_runs, 20);
    assert_eq!(row.hit_ratio, 95.0);
    assert_eq!(row.db.count, 1);
    assert_eq!(row.cache_strategy, "In-Memory Only");

    let report =
        std::fs::read_to_string(out.path().join(scenario_file_name(&ScenarioSpec::new(1, 10))))
            .unwrap();
    assert!(report.contains("Successful Runs: 20/20"));
    assert!(report.contains("  95.0 %"));
    assert_eq!(report.matches("| DB: null ms |").count(), 19);

    let summary = std::fs::read_to_string(out.path().join(SUMMARY_FILE_NAME)).unwrap();
    assert!(summary.contains("Average Cache Hit Ratio: 95.0%"));
}

#[tokio::test]
async fn test_uncached_service_reports_every_run_from_the_database() {
    let server = TestServer::start().await;
    let out = TempDir::new().unwrap();

    let outcome = engine_for(&server, vec![ScenarioSpec::new(5, 25)], 4, &out)
        .run()
        .await
        .unwrap();

    let row = &outcome.rows[0];
    assert_eq!(row.hit_ratio, 0.0);
    assert_eq!(row.db.count, 4);
    assert_eq!(row.cache_strategy, "None");
    assert_eq!(server.source_calls(), 4);
}

#[tokio::test]
async fn test_repeated_runs_produce_the_same_report_layout() {
    let server = TestServer::start().await;
    let scenarios = vec![
        ScenarioSpec::new(1, 10),
        ScenarioSpec::new(50, 10),
        ScenarioSpec::new(1, 100),
    ];
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();

    let first = engine_for(&server, scenarios.clone(), 2, &first_dir)
        .run()
        .await
        .unwrap();
    let second = engine_for(&server, scenarios.clone(), 2, &second_dir)
        .run()
        .await
        .unwrap();

    let order = |rows: &[cacheside_bench::SummaryRow]| rows.iter().map(|r| r.spec).collect::<Vec<_>>();
    assert_eq!(order(&first.rows), scenarios);
    assert_eq!(order(&second.rows), scenarios);

    let mut first_files: Vec<_> = std::fs::read_dir(first_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    let mut second_files: Vec<_> = std::fs::read_dir(second_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    first_files.sort();
    second_files.sort();
    assert_eq!(first_files, second_files);
    assert_eq!(first_files.len(), scenarios.len() + 1);
}

#[tokio::test]
async fn test_unreachable_service_still_writes_reports() {
    let out = TempDir::new().unwrap();
    let client = Arc::new(HttpProductsClient::new("http://127.0.0.1:1/api/products").unwrap());
    let runner = ScenarioRunner::new(client).with_delay(Duration::ZERO);

    let outcome = BenchmarkEngine::new(runner, vec![ScenarioSpec::new(1, 10)], 3, out.path())
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.rows[0].successful_runs, 0);
    let report = std::fs::read_to_string(out.path().join("products_page1_limit10.txt")).unwrap();
    assert!(report.contains("Successful Runs: 0/3"));
    assert_eq!(report.matches("| ERROR: Transport error").count(), 3);
    assert!(!report.contains("NaN"));
}
