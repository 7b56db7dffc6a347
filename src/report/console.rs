// src/report/console.rs
// Human-readable run output. Diagnostics stay on `tracing`; everything here
// is the report itself and goes straight to stdout.

use crate::report::{ResultSet, TestResult};
use chrono::Utc;

const RULE_WIDTH: usize = 60;

pub fn print_header(api_base: &str) {
    println!("🚀 Starting conformance run against: {}", api_base);
    println!(
        "   started at {}",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_banner(title: &str) {
    println!();
    println!("{}:", title);
}

/// One line per check, emitted as soon as the result lands.
pub fn print_result(result: &TestResult) {
    let marker = if result.passed {
        "✅ PASS"
    } else {
        "❌ FAIL"
    };
    match result.latency_ms {
        Some(ms) => println!("{} {} ({:.2}ms)", marker, result.name, ms),
        None => println!("{} {}", marker, result.name),
    }
    if let Some(detail) = &result.detail {
        println!("    {}", detail);
    }
}

pub fn print_summary(results: &ResultSet) {
    println!();
    println!("{}", "=".repeat(RULE_WIDTH));
    println!(
        "Summary: {} passed, {} failed ({} checks)",
        results.passed(),
        results.failed(),
        results.total()
    );

    if !results.failures().is_empty() {
        println!();
        println!("Failed checks:");
        for failure in results.failures() {
            println!("  • {}", failure);
        }
    }
}
