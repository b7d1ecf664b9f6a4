//! Int64 Kernel: Self-Test Harness (binary)
//!
//! Runs the built-in scenarios and reports through the exit status:
//! 0 when every check passes, 1 otherwise.

use std::process::ExitCode;

use int64_kernel::selftest::run_self_test;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = run_self_test();

    for check in &report.checks {
        let tag = if check.passed { "PASS" } else { "FAIL" };
        println!("[{}] {}: {}", tag, check.name, check.detail);
    }

    println!("\n===========================================");
    let passed = report.checks.iter().filter(|c| c.passed).count();
    println!("Results: {}/{} passed", passed, report.checks.len());
    if report.all_passed() {
        println!("All int64 arithmetic self-tests passed.");
        ExitCode::SUCCESS
    } else {
        println!("[FAIL] Some checks failed.");
        ExitCode::FAILURE
    }
}
