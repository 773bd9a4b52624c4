use crate::stats::{self, ScenarioStats, SummaryStatistic};
use crate::{BenchError, ScenarioResult};
use cacheside_domain::ScenarioSpec;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SUMMARY_FILE_NAME: &str = "summary_report.txt";

const SCENARIO_RULE: &str = "==================== SUMMARY ====================";
const SCENARIO_RULE_END: &str = "================================================";
const RAW_RULE: &str = "==================== RAW RUNS ====================";
const SUMMARY_WIDTH: usize = 80;

/// `products_page{P}_limit{L}.txt`
pub fn scenario_file_name(spec: &ScenarioSpec) -> String {
    format!("products_page{}_limit{}.txt", spec.page, spec.limit)
}

/// Raw run lines followed by the scenario's summary block.
pub fn render_scenario_report(result: &ScenarioResult, stats: &ScenarioStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", RAW_RULE);
    for line in &result.log {
        let _ = writeln!(out, "{}", line);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{}", SCENARIO_RULE);
    let _ = writeln!(out, "Page: {}", result.spec.page);
    let _ = writeln!(out, "Limit: {}", result.spec.limit);
    let _ = writeln!(out, "Runs: {}", result.attempted_runs);
    let _ = writeln!(
        out,
        "Successful Runs: {}/{}",
        result.successful_runs(),
        result.attempted_runs
    );
    let _ = writeln!(out, "Cache Strategy: {}", result.cache_strategy_label());
    let _ = writeln!(out);
    write_statistic(&mut out, "Backend Processing Time", &stats.backend);
    let _ = writeln!(out);
    write_statistic(&mut out, "DB Time", &stats.db);
    let _ = writeln!(out);
    let _ = writeln!(out, "Cache Hit Ratio:");
    let _ = writeln!(out, "  {:.1} %", stats.hit_ratio);
    let _ = writeln!(out, "{}", SCENARIO_RULE_END);

    out
}

fn write_statistic(out: &mut String, title: &str, stat: &SummaryStatistic) {
    let _ = writeln!(out, "{}:", title);
    let _ = writeln!(out, "  Samples: {}", stat.count);
    let _ = writeln!(out, "  Mean: {:.2} ms", stat.mean);
    let _ = writeln!(out, "  Std Dev: {:.2} ms", stat.std_dev);
}

/// One line of the cross-scenario table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub spec: ScenarioSpec,
    pub successful_runs: usize,
    pub attempted_runs: u32,
    pub backend: SummaryStatistic,
    pub db: SummaryStatistic,
    pub hit_ratio: f64,
    pub cache_strategy: String,
    pub elapsed_ms: u64,
}

impl SummaryRow {
    pub fn new(result: &ScenarioResult, stats: &ScenarioStats) -> Self {
        Self {
            spec: result.spec,
            successful_runs: result.successful_runs(),
            attempted_runs: result.attempted_runs,
            backend: stats.backend,
            db: stats.db,
            hit_ratio: stats.hit_ratio,
            cache_strategy: result.cache_strategy_label().to_string(),
            elapsed_ms: result.elapsed_ms,
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{:<6}{:<8}{:<10}{:<18}{:<18}{:<15}{}",
            self.spec.page,
            self.spec.limit,
            format!("{}/{}", self.successful_runs, self.attempted_runs),
            format!("{:.2} ± {:.2}", self.backend.mean, self.backend.std_dev),
            format!("{:.2} ± {:.2}", self.db.mean, self.db.std_dev),
            format!("{:.1}%", self.hit_ratio),
            self.cache_strategy
        )
    }
}

/// Column-aligned table of every scenario plus overall averages (mean of
/// the per-scenario means) and the total benchmark duration.
pub fn render_summary(rows: &[SummaryRow], total_elapsed: Duration) -> String {
    let heavy = "=".repeat(SUMMARY_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        "COMPREHENSIVE BENCHMARK SUMMARY".to_string(),
        heavy.clone(),
        String::new(),
        format!(
            "{:<6}{:<8}{:<10}{:<18}{:<18}{:<15}{}",
            "Page", "Limit", "Success", "Backend (ms)", "DB (ms)", "Cache Hit %", "Cache Strategy"
        ),
        "-".repeat(SUMMARY_WIDTH),
    ];
    lines.extend(rows.iter().map(SummaryRow::render));

    let backend_means: Vec<f64> = rows.iter().map(|r| r.backend.mean).collect();
    let db_means: Vec<f64> = rows.iter().map(|r| r.db.mean).collect();
    let hit_ratios: Vec<f64> = rows.iter().map(|r| r.hit_ratio).collect();

    lines.push(String::new());
    lines.push(heavy.clone());
    lines.push(String::new());
    lines.push("OVERALL AVERAGES:".to_string());
    lines.push(format!(
        "Average Backend Time: {:.2} ms",
        stats::mean(&backend_means)
    ));
    lines.push(format!("Average DB Time: {:.2} ms", stats::mean(&db_means)));
    lines.push(format!(
        "Average Cache Hit Ratio: {:.1}%",
        stats::mean(&hit_ratios)
    ));
    lines.push(format!(
        "Total Benchmark Time: {:.1} seconds",
        total_elapsed.as_secs_f64()
    ));
    lines.push(format!("Scenarios Tested: {}", rows.len()));
    lines.push(String::new());
    lines.push(heavy);

    lines.join("\n")
}

/// Writes report files under one output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// Creates the output directory. Failure here aborts the benchmark.
    pub async fn create(output_dir: impl Into<PathBuf>) -> Result<Self, BenchError> {
        let output_dir = output_dir.into();
        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| BenchError::Configuration {
                path: output_dir.display().to_string(),
                source,
            })?;

        Ok(Self { output_dir })
    }

    pub async fn write_scenario(
        &self,
        result: &ScenarioResult,
        stats: &ScenarioStats,
    ) -> Result<PathBuf, BenchError> {
        let path = self.output_dir.join(scenario_file_name(&result.spec));
        self.write(&path, render_scenario_report(result, stats)).await?;
        Ok(path)
    }

    pub async fn write_summary(&self, summary: &str) -> Result<PathBuf, BenchError> {
        let path = self.output_dir.join(SUMMARY_FILE_NAME);
        self.write(&path, summary.to_string()).await?;
        Ok(path)
    }

    async fn write(&self, path: &Path, content: String) -> Result<(), BenchError> {
        tokio::fs::write(path, content)
            .await
            .map_err(|source| BenchError::Io {
                path: path.display().to_string(),
                source,
            })
    }
}
