use crate::ScenarioSpec;
use serde::{Deserialize, Serialize};

/// Benchmark harness configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchConfig {
    /// Products endpoint under test (default: "http://localhost:5001/api/products")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Repetitions per scenario (default: 20)
    #[serde(default = "default_runs")]
    pub runs: u32,

    /// Pause between two calls of a scenario in milliseconds (default: 100)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Directory receiving the scenario and summary reports (default: "results")
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Ordered scenario matrix; iteration order is preserved as written
    #[serde(default = "ScenarioSpec::default_matrix")]
    pub scenarios: Vec<ScenarioSpec>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            runs: default_runs(),
            delay_ms: default_delay_ms(),
            output_dir: default_output_dir(),
            scenarios: ScenarioSpec::default_matrix(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5001/api/products".to_string()
}

fn default_runs() -> u32 {
    20
}

fn default_delay_ms() -> u64 {
    100
}

fn default_output_dir() -> String {
    "results".to_string()
}
