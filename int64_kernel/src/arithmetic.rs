//! Int64 Kernel: Arithmetic Primitives
//!
//! Four stateless operations over `i64`.
//! Overflow wraps (two's complement) in every build profile.
//! Division reports a zero divisor through its return type and never panics.

use crate::error::ArithmeticError;

/// `a + b`, wrapping on overflow.
#[inline]
pub const fn add(a: i64, b: i64) -> i64 {
    a.wrapping_add(b)
}

/// `a - b`, wrapping on overflow.
#[inline]
pub const fn subtract(a: i64, b: i64) -> i64 {
    a.wrapping_sub(b)
}

/// `a * b`, wrapping on overflow.
#[inline]
pub const fn multiply(a: i64, b: i64) -> i64 {
    a.wrapping_mul(b)
}

/// Truncating division (rounds toward zero).
///
/// Returns `Err(DivisionByZero)` when `b == 0`. `i64::MIN / -1` is the one
/// quotient outside the representable range; it wraps to `i64::MIN` like
/// every other overflow in this module.
#[inline]
pub const fn divide(a: i64, b: i64) -> Result<i64, ArithmeticError> {
    if b == 0 {
        return Err(ArithmeticError::DivisionByZero);
    }
    Ok(a.wrapping_div(b))
}

/// `divide` as a `(success, quotient)` pair.
///
/// The quotient is `0` when the flag is false and carries no meaning.
pub fn divide_flagged(a: i64, b: i64) -> (bool, i64) {
    match divide(a, b) {
        Ok(q) => (true, q),
        Err(_) => (false, 0),
    }
}
