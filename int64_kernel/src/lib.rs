#![forbid(unsafe_code)]

//! Int64 Kernel
//!
//! Fixed-width signed integer arithmetic: add, subtract, multiply and
//! checked division over `i64`, with operator dispatch, calculation
//! records, canonical hashing and a self-test harness.

/// Kernel v1. Bumped only if an operation's observable result changes.
pub const KERNEL_VERSION: u32 = 1;

pub mod arithmetic;
pub mod calculation;
pub mod error;
pub mod hashing;
pub mod operator;
pub mod selftest;

pub use arithmetic::{add, divide, divide_flagged, multiply, subtract};
pub use calculation::Calculation;
pub use error::ArithmeticError;
pub use operator::Operator;
