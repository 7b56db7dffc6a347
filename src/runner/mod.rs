// src/runner/mod.rs
use crate::checks::{self, Battery, Check, CheckContext};
use crate::config::Config;
use crate::report::{console, ResultSet, TestResult};
use anyhow::Result;
use tracing::{debug, info};

/// Executes the check battery sequentially against one target and
/// aggregates the results. The runner never aborts early: every check
/// records exactly one result, pass or fail.
pub struct ConformanceRunner {
    ctx: CheckContext,
}

impl ConformanceRunner {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            ctx: CheckContext::new(config)?,
        })
    }

    /// Runs the default battery.
    pub async fn run(&self) -> ResultSet {
        self.run_battery(checks::battery()).await
    }

    /// Runs an explicit battery; the default one comes from
    /// [`checks::battery`]. Each result is printed as soon as it lands.
    pub async fn run_battery(&self, battery: Battery) -> ResultSet {
        let mut results = ResultSet::new();
        console::print_header(&self.ctx.config.api_base());

        for (section, section_checks) in battery {
            console::print_banner(section);
            for check in section_checks {
                let result = self.execute(check.as_ref()).await;
                console::print_result(&result);
                results.record(result);
            }
        }

        info!(
            passed = results.passed(),
            failed = results.failed(),
            "conformance run complete"
        );
        console::print_summary(&results);
        results
    }

    async fn execute(&self, check: &dyn Check) -> TestResult {
        debug!(check = check.name(), "running");
        match check.run(&self.ctx).await {
            Ok(verdict) => TestResult::new(
                check.name(),
                verdict.passed,
                verdict.detail,
                verdict.latency_ms,
            ),
            Err(err) => TestResult::new(check.name(), false, Some(err.to_string()), None),
        }
    }
}
