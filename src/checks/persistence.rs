// src/checks/persistence.rs
use super::endpoints::{create_status, CreateOutcome};
use super::{Check, CheckContext, Verdict};
use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Creates a uniquely-named record, waits out the service's write path, and
/// expects the listing to contain it with matching fields.
pub struct PersistenceCheck {
    probe_name: Option<String>,
}

impl PersistenceCheck {
    pub fn new() -> Self {
        Self { probe_name: None }
    }

    /// Pins the probe name instead of generating one; lets tests mock the
    /// create echo deterministically.
    pub fn with_probe_name(name: impl Into<String>) -> Self {
        Self {
            probe_name: Some(name.into()),
        }
    }

    fn probe_name(&self) -> String {
        self.probe_name
            .clone()
            .unwrap_or_else(|| format!("persistence-probe-{}", Uuid::new_v4().simple()))
    }
}

#[async_trait]
impl Check for PersistenceCheck {
    fn name(&self) -> &'static str {
        "Record Persistence"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let client_name = self.probe_name();

        let record = match create_status(ctx, &client_name).await? {
            CreateOutcome::Created { record, .. } => record,
            CreateOutcome::Rejected { detail } => {
                return Ok(Verdict::fail(format!("failed to create record: {}", detail)));
            }
        };

        debug!(id = %record.id, "waiting before reading the record back");
        tokio::time::sleep(ctx.config.persistence_wait()).await;

        let response = ctx.client.get(ctx.endpoint("/status")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Ok(Verdict::fail(format!(
                "failed to retrieve records: status {}",
                status
            )));
        }

        let records: Vec<Value> = serde_json::from_str(&body)?;
        let found = records
            .iter()
            .find(|entry| entry.get("id").and_then(Value::as_str) == Some(record.id.as_str()));

        match found {
            Some(entry)
                if entry.get("client_name").and_then(Value::as_str)
                    == Some(client_name.as_str()) =>
            {
                Ok(Verdict::pass(format!("record {} persisted", record.id)))
            }
            Some(_) => Ok(Verdict::fail(format!(
                "record {} found but client_name does not match",
                record.id
            ))),
            None => Ok(Verdict::fail(format!(
                "created record {} not found in listing",
                record.id
            ))),
        }
    }
}
