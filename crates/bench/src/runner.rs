use crate::ProductsClient;
use cacheside_domain::{RequestMetrics, ScenarioSpec};
use chrono::SecondsFormat;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const DEFAULT_DELAY: Duration = Duration::from_millis(100);

/// Everything one scenario produced, in run order.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub spec: ScenarioSpec,
    /// Metrics of successful runs only.
    pub samples: Vec<RequestMetrics>,
    pub attempted_runs: u32,
    /// One line per attempt, successful or not.
    pub log: Vec<String>,
    pub elapsed_ms: u64,
}

impl ScenarioResult {
    pub fn successful_runs(&self) -> usize {
        self.samples.len()
    }

    pub fn cache_hits(&self) -> usize {
        self.samples.iter().filter(|m| m.cache_hit).count()
    }

    pub fn backend_times(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|m| m.backend_processing_time_ms)
            .collect()
    }

    /// Source times of runs that reached the source; cache hits carry none.
    pub fn db_times(&self) -> Vec<f64> {
        self.samples.iter().filter_map(|m| m.db_time_ms).collect()
    }

    /// Label reported by the last successful run.
    pub fn cache_strategy_label(&self) -> &str {
        self.samples
            .last()
            .map(|m| m.cache_strategy_label.as_str())
            .unwrap_or("Unknown")
    }
}

/// Runs one scenario sequentially with a fixed pause between calls.
pub struct ScenarioRunner {
    client: Arc<dyn ProductsClient>,
    delay: Duration,
}

impl ScenarioRunner {
    pub fn new(client: Arc<dyn ProductsClient>) -> Self {
        Self {
            client,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes exactly `runs` attempts. Failed attempts are logged and never
    /// stop the scenario.
    pub async fn run(&self, spec: ScenarioSpec, runs: u32) -> ScenarioResult {
        let started = Instant::now();
        let mut samples = Vec::with_capacity(runs as usize);
        let mut log = Vec::with_capacity(runs as usize);

        for run in 1..=runs {
            match self.client.fetch(&spec).await {
                Ok(metrics) => {
                    debug!(scenario = %spec, run, cache_hit = metrics.cache_hit, "Run completed");
                    log.push(format_sample_line(run, &metrics));
                    samples.push(metrics);
                }
                Err(e) => {
                    warn!(scenario = %spec, run, error = %e, "Run failed");
                    log.push(format!("Run {} | ERROR: {}", run, e));
                }
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        ScenarioResult {
            spec,
            samples,
            attempted_runs: runs,
            log,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

pub fn format_sample_line(run: u32, metrics: &RequestMetrics) -> String {
    let db = metrics
        .db_time_ms
        .map(|ms| format!("{:.2}", ms))
        .unwrap_or_else(|| "null".to_string());

    format!(
        "Run {} | Backend: {:.2} ms | DB: {} ms | CacheHit: {} | Time: {}",
        run,
        metrics.backend_processing_time_ms,
        db,
        metrics.cache_hit,
        metrics.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
