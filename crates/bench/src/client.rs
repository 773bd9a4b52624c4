use crate::BenchError;
use async_trait::async_trait;
use cacheside_domain::{RequestMetrics, ScenarioSpec};
use serde::Deserialize;

/// Network entry point of the cache-aside service as seen by the runner.
#[async_trait]
pub trait ProductsClient: Send + Sync {
    async fn fetch(&self, spec: &ScenarioSpec) -> Result<RequestMetrics, BenchError>;
}

#[derive(Deserialize)]
struct ApiEnvelope {
    success: bool,
    metrics: Option<RequestMetrics>,
    error: Option<String>,
}

/// `GET {base_url}?page=P&limit=L` over reqwest. No request timeout is set;
/// transport failures surface as [`BenchError::Transport`].
pub struct HttpProductsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProductsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, BenchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| BenchError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ProductsClient for HttpProductsClient {
    async fn fetch(&self, spec: &ScenarioSpec) -> Result<RequestMetrics, BenchError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("page", spec.page), ("limit", spec.limit)])
            .send()
            .await
            .map_err(|e| BenchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BenchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .map_err(|e| BenchError::Decode(e.to_string()))?;

        if !envelope.success {
            return Err(BenchError::Server(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope
            .metrics
            .ok_or_else(|| BenchError::Decode("response carries no metrics".to_string()))
    }
}
