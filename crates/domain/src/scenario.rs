use serde::{Deserialize, Serialize};
use std::fmt;

/// One (page, limit) workload of the benchmark matrix. `page` is 1-based,
/// exactly as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub page: u32,
    pub limit: u32,
}

impl ScenarioSpec {
    pub const fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Limit-major matrix: pages {1, 5, 10, 50} for each limit in
    /// {10, 25, 50, 100}.
    pub fn default_matrix() -> Vec<ScenarioSpec> {
        const PAGES: [u32; 4] = [1, 5, 10, 50];
        const LIMITS: [u32; 4] = [10, 25, 50, 100];

        LIMITS
            .iter()
            .flat_map(|&limit| PAGES.iter().map(move |&page| ScenarioSpec::new(page, limit)))
            .collect()
    }
}

impl fmt::Display for ScenarioSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page={}, limit={}", self.page, self.limit)
    }
}
