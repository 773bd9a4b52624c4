use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Server reported failure: {0}")]
    Server(String),

    #[error("Cannot prepare output directory {path}: {source}")]
    Configuration {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl BenchError {
    /// Per-run failures are recorded and the scenario continues.
    pub fn is_run_failure(&self) -> bool {
        matches!(
            self,
            BenchError::Transport(_)
                | BenchError::Http { .. }
                | BenchError::Decode(_)
                | BenchError::Server(_)
        )
    }
}
