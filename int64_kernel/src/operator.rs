//! Int64 Kernel: Operator Dispatch
//!
//! Maps the four operator symbols onto the arithmetic primitives.
//! Operators serialize as their symbol (`"+"`, `"-"`, `"*"`, `"/"`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arithmetic::{add, divide, multiply, subtract};
use crate::error::ArithmeticError;

/// A two-operand integer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// Every operator, in dispatch order.
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        }
    }

    /// Resolve a symbol. Surrounding whitespace is not accepted.
    pub fn from_symbol(symbol: &str) -> Result<Self, ArithmeticError> {
        match symbol {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            other => Err(ArithmeticError::UnknownOperator(other.to_string())),
        }
    }

    /// Apply the operator. Only `Divide` can fail.
    pub fn apply(self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        match self {
            Operator::Add => Ok(add(a, b)),
            Operator::Subtract => Ok(subtract(a, b)),
            Operator::Multiply => Ok(multiply(a, b)),
            Operator::Divide => divide(a, b),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_symbol(s)
    }
}
