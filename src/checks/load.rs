// src/checks/load.rs
// Coarse concurrent-load check: fan out GETs, join on all of them, reduce by
// counting.

use super::{Check, CheckContext, Verdict};
use crate::error::CheckError;
use crate::report::Timer;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
struct RequestOutcome {
    ok: bool,
    latency_ms: f64,
}

/// Fans N GETs at the root endpoint through a bounded worker pool and
/// requires most of them to come back 200. Reports mean latency over the
/// successful subset.
pub struct ConcurrentLoadCheck;

#[async_trait]
impl Check for ConcurrentLoadCheck {
    fn name(&self) -> &'static str {
        "Concurrent Load"
    }

    async fn run(&self, ctx: &CheckContext) -> Result<Verdict, CheckError> {
        let load = ctx.config.load.clone();
        let pool = Arc::new(Semaphore::new(load.workers));
        let mut tasks = Vec::with_capacity(load.requests);

        for _ in 0..load.requests {
            let client = ctx.client.clone();
            let url = ctx.endpoint("/");
            let pool = pool.clone();

            tasks.push(tokio::spawn(async move {
                // The pool is never closed while tasks are in flight.
                let _permit = pool.acquire_owned().await.expect("worker pool closed");
                let timer = Timer::new();
                match client.get(&url).send().await {
                    Ok(response) => RequestOutcome {
                        ok: response.status() == StatusCode::OK,
                        latency_ms: timer.elapsed_ms(),
                    },
                    Err(err) => {
                        debug!(%err, "load request failed");
                        RequestOutcome {
                            ok: false,
                            latency_ms: 0.0,
                        }
                    }
                }
            }));
        }

        // Blocking join over the whole fan-out; outcomes arrive unordered.
        let joined = futures::future::join_all(tasks).await;
        let outcomes: Vec<RequestOutcome> = joined
            .into_iter()
            .map(|task| match task {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(%err, "load task failed to join");
                    RequestOutcome {
                        ok: false,
                        latency_ms: 0.0,
                    }
                }
            })
            .collect();

        let (successful, avg_latency_ms) = aggregate(&outcomes);

        if successful >= load.success_threshold {
            Ok(
                Verdict::pass(format!("{}/{} requests successful", successful, load.requests))
                    .with_latency(avg_latency_ms),
            )
        } else {
            Ok(Verdict::fail(format!(
                "only {}/{} requests successful",
                successful, load.requests
            )))
        }
    }
}

/// Success count plus mean latency over the successful subset (0 when none
/// succeeded).
fn aggregate(outcomes: &[RequestOutcome]) -> (usize, f64) {
    let successes: Vec<f64> = outcomes
        .iter()
        .filter(|outcome| outcome.ok)
        .map(|outcome| outcome.latency_ms)
        .collect();

    let successful = successes.len();
    let avg = if successes.is_empty() {
        0.0
    } else {
        successes.iter().sum::<f64>() / successful as f64
    };
    (successful, avg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(latency_ms: f64) -> RequestOutcome {
        RequestOutcome {
            ok: true,
            latency_ms,
        }
    }

    fn failed() -> RequestOutcome {
        RequestOutcome {
            ok: false,
            latency_ms: 0.0,
        }
    }

    #[test]
    fn averages_over_the_successful_subset_only() {
        let mut outcomes = vec![failed()];
        outcomes.extend((1..=9).map(|i| ok(i as f64 * 10.0)));

        let (successful, avg) = aggregate(&outcomes);
        assert_eq!(successful, 9);
        assert!((avg - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_successes_yields_zero_latency() {
        let outcomes = vec![failed(), failed(), failed()];
        assert_eq!(aggregate(&outcomes), (0, 0.0));
    }

    #[test]
    fn empty_outcome_list_is_harmless() {
        assert_eq!(aggregate(&[]), (0, 0.0));
    }
}
