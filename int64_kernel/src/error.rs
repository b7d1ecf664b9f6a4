//! Kernel error taxonomy.
//!
//! The four operations only ever fail on a zero divisor. Operator
//! dispatch adds one more failure: a symbol that names no operation.
//! Overflow is not an error anywhere in the kernel.

use thiserror::Error;

/// All recoverable kernel failures. Returned, never raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// `divide(a, 0)`. The quotient does not exist and is never produced.
    #[error("division by zero")]
    DivisionByZero,
    /// Operator symbol outside `+ - * /`.
    #[error("unknown operator {0:?}: expected one of + - * /")]
    UnknownOperator(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_division_by_zero() {
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn test_display_unknown_operator_quotes_symbol() {
        let err = ArithmeticError::UnknownOperator("%".to_string());
        assert_eq!(err.to_string(), "unknown operator \"%\": expected one of + - * /");
    }
}
