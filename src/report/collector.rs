// src/report/collector.rs
use std::time::Instant;

/// Outcome of a single conformance check. Immutable once recorded.
#[derive(Debug, Clone)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub detail: Option<String>,
    pub latency_ms: Option<f64>,
}

impl TestResult {
    pub fn new(
        name: impl Into<String>,
        passed: bool,
        detail: Option<String>,
        latency_ms: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            passed,
            detail,
            latency_ms,
        }
    }
}

/// Append-only accumulator for the run. One record per check performed;
/// `passed + failed` always equals the number of recorded results.
#[derive(Debug, Default)]
pub struct ResultSet {
    passed: usize,
    failed: usize,
    failures: Vec<String>,
    results: Vec<TestResult>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: TestResult) {
        if result.passed {
            self.passed += 1;
        } else {
            self.failed += 1;
            let message = match &result.detail {
                Some(detail) => format!("{}: {}", result.name, detail),
                None => result.name.clone(),
            };
            self.failures.push(message);
        }
        self.results.push(result);
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Failure messages in the order the failures were recorded.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn record_tracks_counters_and_failure_messages() {
        let mut set = ResultSet::new();
        set.record(TestResult::new("Root Health Check", true, None, Some(3.2)));
        set.record(TestResult::new(
            "Status Listing",
            false,
            Some("expected a JSON array".to_string()),
            None,
        ));

        assert_eq!(set.passed(), 1);
        assert_eq!(set.failed(), 1);
        assert_eq!(set.total(), 2);
        assert!(!set.all_passed());
        assert_eq!(
            set.failures(),
            &["Status Listing: expected a JSON array".to_string()]
        );
    }

    #[test]
    fn empty_set_counts_as_all_passed() {
        let set = ResultSet::new();
        assert!(set.all_passed());
        assert_eq!(set.total(), 0);
    }

    proptest! {
        #[test]
        fn passed_plus_failed_equals_total(outcomes in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut set = ResultSet::new();
            for (i, passed) in outcomes.iter().enumerate() {
                set.record(TestResult::new(format!("check-{}", i), *passed, None, None));
            }
            prop_assert_eq!(set.total(), outcomes.len());
            prop_assert_eq!(set.passed() + set.failed(), set.total());
            prop_assert_eq!(set.all_passed(), set.failed() == 0);
        }
    }
}
