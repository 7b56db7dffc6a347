// src/checks/endpoints.rs
// Core CRUD checks: root health, collection listing, record creation.

use super::{Check, CheckContext, Verdict};
use crate::error::CheckError;
use crate::report::Timer;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Client name sent by the plain creation check.
pub const PROBE_CLIENT_NAME: &str = "Backend Test User";

const REQUIRED_FIELDS: [&str; 3] = ["id", "client_name", "timestamp"];

/// The resource under test. The probe validates its shape only; the
/// timestamp stays an opaque string since the contract requires presence,
/// not a particular format.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRecord {
    pub id: String,
    pub client_name: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct NewStatus<'a> {
    client_name: &'a str,
}

/// What the create endpoint did with a well-formed payload.
#[derive(Debug)]
pub enum CreateOutcome {
    Created { record: StatusRecord, latency_ms: f64 },
    Rejected { detail: String },
}

/// POSTs a new status record and validates the echoed shape. Shared by the
/// creation and persistence checks; the caller gets the created record back.
pub async fn create_status(
    ctx: &CheckContext,
    client_name: &str,
) -> Result<CreateOutcome, CheckError> {
    let timer = Timer::new();
    let response = ctx
        .client
        .post(ctx.endpoint("/status"))
        .json(&NewStatus { client_name })
        .send()
        .await?;
    let latency_ms = timer.elapsed_ms();

    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        return Ok(CreateOutcome::Rejected {
            detail: format!("unexpected status {}: {}", status, body.trim()),
        });
    }

    let value: Value = serde_json::from_str(&body)?;
    let missing: Vec<&str> = REQUIRED_FIELDS
        .into_iter()
        .filter(|field| value.get(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Ok(CreateOutcome::Rejected {
            detail: format!("missing fields: {}", missing.join(", ")),
        });
    }

    let record: StatusRecord = serde_json::from_value(value)?;
    if record.client_name != client_name {
        return Ok(CreateOutcome::Rejected {
            detail: format!(
                "client_name mismatch: expected {:?}, got {:?}",
                client_name, record.client_name
            ),
        });
    }

    debug!(id = %record.id, "created status record");
    Ok(CreateOutcome::Created { record, latency_ms })
}

/// GET on the API root must answer 200 with a JSON `message` field.
pub struct HealthCheck;

#[async_trait]
impl Check for HealthCheck {
    fn name(&self) -> &'static str {
        "Root Health Check"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let timer = Timer::new();
        let response = ctx.client.get(ctx.endpoint("/")).send().await?;
        let latency_ms = timer.elapsed_ms();

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Ok(Verdict::fail(format!(
                "status {}: {}",
                status,
                body.trim()
            )));
        }

        let value: Value = serde_json::from_str(&body)?;
        if value.get("message").is_some() {
            Ok(Verdict::pass(format!("response: {}", body.trim())).with_latency(latency_ms))
        } else {
            Ok(Verdict::fail(format!(
                "missing 'message' field in response: {}",
                body.trim()
            )))
        }
    }
}

/// GET on the collection must answer 200 with a JSON array; contents and
/// ordering are unconstrained.
pub struct ListCheck;

#[async_trait]
impl Check for ListCheck {
    fn name(&self) -> &'static str {
        "Status Listing"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let timer = Timer::new();
        let response = ctx.client.get(ctx.endpoint("/status")).send().await?;
        let latency_ms = timer.elapsed_ms();

        let status = response.status();
        let body = response.text().await?;
        if status != StatusCode::OK {
            return Ok(Verdict::fail(format!(
                "status {}: {}",
                status,
                body.trim()
            )));
        }

        match serde_json::from_str::<Value>(&body)? {
            Value::Array(records) => Ok(Verdict::pass(format!(
                "retrieved {} status checks",
                records.len()
            ))
            .with_latency(latency_ms)),
            other => Ok(Verdict::fail(format!(
                "expected a JSON array, got: {}",
                other
            ))),
        }
    }
}

/// POST with a valid payload must echo the record back with id, client_name
/// and timestamp.
pub struct CreateCheck;

#[async_trait]
impl Check for CreateCheck {
    fn name(&self) -> &'static str {
        "Status Creation"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        match create_status(ctx, PROBE_CLIENT_NAME).await? {
            CreateOutcome::Created { record, latency_ms } => Ok(Verdict::pass(format!(
                "created status check {}",
                record.id
            ))
            .with_latency(latency_ms)),
            CreateOutcome::Rejected { detail } => Ok(Verdict::fail(detail)),
        }
    }
}
