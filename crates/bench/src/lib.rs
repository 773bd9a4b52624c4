//! Cacheside benchmark harness
//!
//! Drives the products endpoint over a fixed scenario matrix, one request
//! at a time, and writes per-scenario and summary reports.

pub mod client;
pub mod engine;
pub mod error;
pub mod report;
pub mod runner;
pub mod stats;

pub use client::{HttpProductsClient, ProductsClient};
pub use engine::{BenchmarkEngine, BenchmarkOutcome};
pub use error::BenchError;
pub use report::{ReportWriter, SummaryRow};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use stats::{ScenarioStats, SummaryStatistic};
