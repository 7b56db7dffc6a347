// src/checks/mod.rs
mod endpoints;
mod load;
mod persistence;
mod security;
mod validation;

pub use endpoints::{
    create_status, CreateCheck, CreateOutcome, HealthCheck, ListCheck, StatusRecord,
    PROBE_CLIENT_NAME,
};
pub use load::ConcurrentLoadCheck;
pub use persistence::PersistenceCheck;
pub use security::{CorsHeadersCheck, TransportSecurityCheck};
pub use validation::{ContentTypeCheck, InvalidPayloadCheck};

use crate::config::Config;
use crate::error::CheckError;
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Shared state handed to every check: one connection-pooled HTTP client and
/// the resolved target configuration.
pub struct CheckContext {
    pub client: Client,
    pub config: Config,
}

impl CheckContext {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Absolute URL for a path under the API prefix, e.g. `endpoint("/status")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base(), path)
    }
}

/// What a check concluded once it got far enough to judge the contract.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub passed: bool,
    pub detail: Option<String>,
    pub latency_ms: Option<f64>,
}

impl Verdict {
    pub fn pass(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: Some(detail.into()),
            latency_ms: None,
        }
    }

    pub fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: Some(detail.into()),
            latency_ms: None,
        }
    }

    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }
}

/// One independent request/assertion pair against the target service.
#[async_trait]
pub trait Check: Send + Sync {
    /// Human-readable name printed on the report line.
    fn name(&self) -> &'static str;

    /// Runs the check. Transport problems surface as `Err`; contract
    /// violations come back as a failed `Verdict`. Neither aborts the run.
    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError>;
}

/// Checks grouped by report section, in execution order.
pub type Battery = Vec<(&'static str, Vec<Box<dyn Check>>)>;

/// The fixed battery the runner executes by default.
pub fn battery() -> Battery {
    vec![
        (
            "Core API Endpoints",
            vec![
                Box::new(HealthCheck) as Box<dyn Check>,
                Box::new(ListCheck),
                Box::new(CreateCheck),
            ],
        ),
        (
            "Error Handling",
            vec![Box::new(InvalidPayloadCheck) as Box<dyn Check>],
        ),
        (
            "Security & Headers",
            vec![
                Box::new(CorsHeadersCheck) as Box<dyn Check>,
                Box::new(TransportSecurityCheck),
                Box::new(ContentTypeCheck),
            ],
        ),
        (
            "Performance & Persistence",
            vec![
                Box::new(ConcurrentLoadCheck) as Box<dyn Check>,
                Box::new(PersistenceCheck::new()),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn battery_holds_nine_checks() {
        let total: usize = battery().iter().map(|(_, checks)| checks.len()).sum();
        assert_eq!(total, 9);
    }

    #[test]
    fn endpoint_joins_prefix_and_path() {
        let ctx = CheckContext::new(Config::default()).unwrap();
        assert_eq!(ctx.endpoint("/"), "https://127.0.0.1:8000/api/");
        assert_eq!(ctx.endpoint("/status"), "https://127.0.0.1:8000/api/status");
    }
}
