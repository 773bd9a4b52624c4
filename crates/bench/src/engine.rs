use crate::report::{render_summary, ReportWriter, SummaryRow};
use crate::{BenchError, ScenarioRunner, ScenarioStats};
use cacheside_domain::ScenarioSpec;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// What a complete matrix run produced.
#[derive(Debug, Clone)]
pub struct BenchmarkOutcome {
    /// One row per scenario, in matrix order.
    pub rows: Vec<SummaryRow>,
    pub scenario_paths: Vec<PathBuf>,
    pub summary: String,
    pub summary_path: PathBuf,
    pub total_elapsed: Duration,
}

/// Walks the scenario matrix in declaration order, strictly one scenario
/// and one request at a time.
///
/// # Example
///
/// ```rust,ignore
/// let client = Arc::new(HttpProductsClient::new("http://localhost:5000/api/products")?);
/// BenchmarkEngine::new(ScenarioRunner::new(client), ScenarioSpec::default_matrix(), 20, "results")
///     .run()
///     .await?;
/// ```
pub struct BenchmarkEngine {
    runner: ScenarioRunner,
    scenarios: Arc<[ScenarioSpec]>,
    runs: u32,
    output_dir: PathBuf,
}

impl BenchmarkEngine {
    pub fn new(
        runner: ScenarioRunner,
        scenarios: impl Into<Arc<[ScenarioSpec]>>,
        runs: u32,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            scenarios: scenarios.into(),
            runs,
            output_dir: output_dir.into(),
        }
    }

    /// Only setup failures (output directory, summary file) return an
    /// error; failed runs and unwritable scenario files are logged.
    pub async fn run(&self) -> Result<BenchmarkOutcome, BenchError> {
        let writer = ReportWriter::create(&self.output_dir).await?;
        let total = self.scenarios.len();
        let started = Instant::now();

        info!(
            scenarios = total,
            runs = self.runs,
            output_dir = %self.output_dir.display(),
            "Starting benchmark"
        );

        let mut rows = Vec::with_capacity(total);
        let mut scenario_paths = Vec::with_capacity(total);

        for (index, spec) in self.scenarios.iter().enumerate() {
            info!(
                scenario = index + 1,
                total,
                page = spec.page,
                limit = spec.limit,
                "Running scenario"
            );

            let result = self.runner.run(*spec, self.runs).await;
            let stats = ScenarioStats::from_result(&result);

            match writer.write_scenario(&result, &stats).await {
                Ok(path) => {
                    info!(
                        elapsed_ms = result.elapsed_ms,
                        successful = result.successful_runs(),
                        hit_ratio = stats.hit_ratio,
                        path = %path.display(),
                        "Scenario completed"
                    );
                    scenario_paths.push(path);
                }
                Err(e) => error!(scenario = %spec, error = %e, "Failed to save scenario report"),
            }

            rows.push(SummaryRow::new(&result, &stats));
        }

        let total_elapsed = started.elapsed();
        let summary = render_summary(&rows, total_elapsed);
        let summary_path = writer.write_summary(&summary).await?;

        info!(
            scenarios = total,
            path = %summary_path.display(),
            "All scenarios completed\n{}",
            summary
        );

        Ok(BenchmarkOutcome {
            rows,
            scenario_paths,
            summary,
            summary_path,
            total_elapsed,
        })
    }
}
