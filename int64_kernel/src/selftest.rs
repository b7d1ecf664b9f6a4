//! Int64 Kernel: Self-Test Harness
//!
//! Fixed scenarios evaluated through the public API, plus a determinism
//! pass: the scenarios are evaluated twice and both passes must hash to
//! the same canonical value.

use tracing::{info, warn};

use crate::calculation::Calculation;
use crate::error::ArithmeticError;
use crate::hashing::canonical_hash;
use crate::operator::Operator;

/// What a scenario must produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Value(i64),
    DivisionByZero,
}

/// One named self-test input.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub operator: Operator,
    pub arg1: i64,
    pub arg2: i64,
    pub expected: Expected,
}

pub const SCENARIOS: &[Scenario] = &[
    Scenario { name: "add", operator: Operator::Add, arg1: 2, arg2: 3, expected: Expected::Value(5) },
    Scenario { name: "subtract", operator: Operator::Subtract, arg1: 5, arg2: 3, expected: Expected::Value(2) },
    Scenario { name: "multiply", operator: Operator::Multiply, arg1: 7, arg2: 6, expected: Expected::Value(42) },
    Scenario { name: "divide", operator: Operator::Divide, arg1: 10, arg2: 2, expected: Expected::Value(5) },
    Scenario { name: "divide_by_zero", operator: Operator::Divide, arg1: 1, arg2: 0, expected: Expected::DivisionByZero },
    Scenario { name: "divide_truncates", operator: Operator::Divide, arg1: -7, arg2: 2, expected: Expected::Value(-3) },
    Scenario { name: "add_wraps", operator: Operator::Add, arg1: i64::MAX, arg2: 1, expected: Expected::Value(i64::MIN) },
    Scenario { name: "subtract_wraps", operator: Operator::Subtract, arg1: i64::MIN, arg2: 1, expected: Expected::Value(i64::MAX) },
    Scenario { name: "multiply_wraps", operator: Operator::Multiply, arg1: i64::MAX, arg2: 2, expected: Expected::Value(-2) },
    Scenario { name: "divide_min_by_minus_one", operator: Operator::Divide, arg1: i64::MIN, arg2: -1, expected: Expected::Value(i64::MIN) },
];

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

/// Result of a full self-test run.
#[derive(Debug, Clone)]
pub struct SelfTestReport {
    pub checks: Vec<CheckOutcome>,
    /// Canonical hash of the successful scenario calculations.
    pub hash: String,
}

impl SelfTestReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

/// Evaluate one scenario against its expectation.
pub fn check_scenario(scenario: &Scenario) -> CheckOutcome {
    let outcome = Calculation::evaluate(scenario.operator, scenario.arg1, scenario.arg2);
    let (passed, detail) = match (outcome, scenario.expected) {
        (Ok(calc), Expected::Value(want)) => (calc.result == want, calc.expression()),
        (Err(ArithmeticError::DivisionByZero), Expected::DivisionByZero) => (
            true,
            format!("{} / {} rejected: division by zero", scenario.arg1, scenario.arg2),
        ),
        (Ok(calc), Expected::DivisionByZero) => {
            (false, format!("{} (expected division by zero)", calc.expression()))
        }
        (Err(err), expected) => (false, format!("unexpected error: {err} (expected {expected:?})")),
    };
    CheckOutcome {
        name: scenario.name.to_string(),
        passed,
        detail,
    }
}

/// Evaluate every scenario that produces a value, in scenario order.
pub fn evaluate_scenarios(scenarios: &[Scenario]) -> Vec<Calculation> {
    scenarios
        .iter()
        .filter_map(|s| Calculation::evaluate(s.operator, s.arg1, s.arg2).ok())
        .collect()
}

/// Run all scenarios and the determinism check.
pub fn run_self_test() -> SelfTestReport {
    let mut checks: Vec<CheckOutcome> = SCENARIOS.iter().map(check_scenario).collect();

    let h1 = canonical_hash(&evaluate_scenarios(SCENARIOS));
    let h2 = canonical_hash(&evaluate_scenarios(SCENARIOS));
    checks.push(CheckOutcome {
        name: "determinism".to_string(),
        passed: h1 == h2,
        detail: if h1 == h2 {
            format!("hash={h1}")
        } else {
            format!("run1={h1} run2={h2}")
        },
    });

    let report = SelfTestReport { checks, hash: h1 };
    if report.all_passed() {
        info!(checks = report.checks.len(), hash = %report.hash, "self-test passed");
    } else {
        warn!(failures = report.failures().count(), "self-test failed");
    }
    report
}
