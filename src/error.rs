// src/error.rs
use thiserror::Error;

/// Failure modes a check can hit before it is able to render a verdict.
/// Contract violations are not errors; they come back as failed verdicts.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response body is not valid JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),
}
