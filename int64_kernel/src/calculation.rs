//! Int64 Kernel: Calculation Records
//!
//! A calculation is an evaluated two-operand request. Pure data once built.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ArithmeticError;
use crate::operator::Operator;

/// One evaluated operation and its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calculation {
    pub operator: Operator,
    pub arg1: i64,
    pub arg2: i64,
    pub result: i64,
}

impl Calculation {
    /// Evaluate `arg1 <operator> arg2`. Fails only on a zero divisor.
    pub fn evaluate(operator: Operator, arg1: i64, arg2: i64) -> Result<Self, ArithmeticError> {
        let result = operator.apply(arg1, arg2)?;
        debug!(%operator, arg1, arg2, result, "evaluated calculation");
        Ok(Self {
            operator,
            arg1,
            arg2,
            result,
        })
    }

    /// Human-readable form, e.g. `"7 * 6 = 42"`.
    pub fn expression(&self) -> String {
        format!(
            "{} {} {} = {}",
            self.arg1, self.operator, self.arg2, self.result
        )
    }

    /// True if re-evaluating the operands reproduces `result`.
    pub fn is_consistent(&self) -> bool {
        self.operator.apply(self.arg1, self.arg2) == Ok(self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_and_expression() {
        let calc = Calculation::evaluate(Operator::Multiply, 7, 6).unwrap();
        assert_eq!(calc.result, 42);
        assert_eq!(calc.expression(), "7 * 6 = 42");
    }

    #[test]
    fn test_expression_negative_operands() {
        let calc = Calculation::evaluate(Operator::Subtract, -5, -3).unwrap();
        assert_eq!(calc.expression(), "-5 - -3 = -2");
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        assert_eq!(
            Calculation::evaluate(Operator::Divide, 1, 0),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_consistency_check() {
        let mut calc = Calculation::evaluate(Operator::Add, 2, 3).unwrap();
        assert!(calc.is_consistent());
        calc.result = 6;
        assert!(!calc.is_consistent());
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let json = r#"{"operator":"+","arg1":1,"arg2":2,"result":3,"extra":0}"#;
        assert!(serde_json::from_str::<Calculation>(json).is_err());
    }
}
