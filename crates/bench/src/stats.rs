use crate::ScenarioResult;

/// Arithmetic mean. An empty sample reports `0.0` rather than NaN.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by N, not N - 1). An empty
/// sample reports `0.0`.
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Hits as a percentage of `total`; `0.0` when nothing was measured.
pub fn hit_ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (hits as f64 / total as f64) * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SummaryStatistic {
    pub mean: f64,
    pub std_dev: f64,
    pub count: usize,
}

impl SummaryStatistic {
    pub fn from_samples(values: &[f64]) -> Self {
        Self {
            mean: mean(values),
            std_dev: population_std_dev(values),
            count: values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Aggregates of one scenario. Only successful runs contribute; the db
/// series skips cache hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioStats {
    pub backend: SummaryStatistic,
    pub db: SummaryStatistic,
    pub hit_ratio: f64,
}

impl ScenarioStats {
    pub fn from_result(result: &ScenarioResult) -> Self {
        Self {
            backend: SummaryStatistic::from_samples(&result.backend_times()),
            db: SummaryStatistic::from_samples(&result.db_times()),
            hit_ratio: hit_ratio(result.cache_hits(), result.successful_runs()),
        }
    }
}
