// src/checks/security.rs
// CORS preflight and transport-scheme checks.

use super::{Check, CheckContext, Verdict};
use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::Method;

const CORS_HEADERS: [&str; 3] = [
    "access-control-allow-origin",
    "access-control-allow-methods",
    "access-control-allow-headers",
];

/// A preflight response must expose enough CORS headers for a browser
/// client; two of the three standard ones are the minimum.
pub struct CorsHeadersCheck;

#[async_trait]
impl Check for CorsHeadersCheck {
    fn name(&self) -> &'static str {
        "CORS Headers"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let response = ctx
            .client
            .request(Method::OPTIONS, ctx.endpoint("/status"))
            .send()
            .await?;

        let present: Vec<&str> = CORS_HEADERS
            .into_iter()
            .filter(|name| response.headers().contains_key(*name))
            .collect();

        if present.len() >= 2 {
            Ok(Verdict::pass(format!(
                "found headers: {}",
                present.join(", ")
            )))
        } else {
            Ok(Verdict::fail(format!(
                "missing CORS headers, found: [{}]",
                present.join(", ")
            )))
        }
    }
}

/// Inspects the configured scheme only; no request is made.
pub struct TransportSecurityCheck;

#[async_trait]
impl Check for TransportSecurityCheck {
    fn name(&self) -> &'static str {
        "Transport Security"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let url = &ctx.config.base_url;
        if url.scheme() == "https" {
            Ok(Verdict::pass("base URL uses HTTPS"))
        } else {
            Ok(Verdict::fail(format!(
                "base URL is not using HTTPS: {}",
                url
            )))
        }
    }
}
