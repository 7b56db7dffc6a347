// src/checks/validation.rs
// Input-validation and response-format checks.

use super::{Check, CheckContext, Verdict};
use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// POST with the required field absent must be rejected with a 4xx/5xx
/// status; 422 is what a validating framework normally answers.
pub struct InvalidPayloadCheck;

#[async_trait]
impl Check for InvalidPayloadCheck {
    fn name(&self) -> &'static str {
        "Invalid Payload Rejection"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let response = ctx
            .client
            .post(ctx.endpoint("/status"))
            .json(&json!({ "invalid_field": "test" }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            Ok(Verdict::pass("rejected invalid payload with 422"))
        } else if status.as_u16() >= 400 {
            Ok(Verdict::pass(format!(
                "rejected invalid payload with status {}",
                status.as_u16()
            )))
        } else {
            Ok(Verdict::fail(format!(
                "invalid payload was accepted with status {}",
                status.as_u16()
            )))
        }
    }
}

/// The root endpoint must declare `application/json` and actually send JSON.
pub struct ContentTypeCheck;

#[async_trait]
impl Check for ContentTypeCheck {
    fn name(&self) -> &'static str {
        "JSON Content Type"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let response = ctx.client.get(ctx.endpoint("/")).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_owned();
        let body = response.text().await?;

        if !content_type.starts_with("application/json") {
            return Ok(Verdict::fail(format!("content-type: {:?}", content_type)));
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(_) => Ok(Verdict::pass("valid JSON response")),
            Err(err) => Ok(Verdict::fail(format!("body is not valid JSON: {}", err))),
        }
    }
}
