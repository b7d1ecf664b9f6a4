//! JSON math request codec.
//!
//! Request body: `{"operator": "+", "arg1": 2, "arg2": 3}`.
//! Operands may be JSON integers or integer strings. Unknown fields are
//! ignored. Trailing NUL padding from fixed-size read buffers is stripped.
//!
//! Reply: `{"result": 5, "expression": "2 + 3 = 5"}` (200) or
//! `{"error": "..."}` (400).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use int64_kernel::{Calculation, Operator};

use crate::error::RequestError;

/// A parsed two-operand request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathRequest {
    pub operator: Operator,
    pub arg1: i64,
    pub arg2: i64,
}

impl MathRequest {
    pub fn new(operator: Operator, arg1: i64, arg2: i64) -> Self {
        Self {
            operator,
            arg1,
            arg2,
        }
    }

    pub fn evaluate(&self) -> Result<Calculation, RequestError> {
        Ok(Calculation::evaluate(self.operator, self.arg1, self.arg2)?)
    }
}

/// Reply to a math request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathReply {
    Ok { result: i64, expression: String },
    Rejected { error: String },
}

impl MathReply {
    pub fn status_code(&self) -> u16 {
        match self {
            MathReply::Ok { .. } => 200,
            MathReply::Rejected { .. } => 400,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            MathReply::Ok { result, expression } => {
                json!({ "result": result, "expression": expression })
            }
            MathReply::Rejected { error } => json!({ "error": error }),
        }
    }

    /// Compact JSON body.
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl From<&Calculation> for MathReply {
    fn from(calc: &Calculation) -> Self {
        MathReply::Ok {
            result: calc.result,
            expression: calc.expression(),
        }
    }
}

impl From<&RequestError> for MathReply {
    fn from(err: &RequestError) -> Self {
        MathReply::Rejected {
            error: err.to_string(),
        }
    }
}

/// Parse a JSON request body.
pub fn parse_math_request(body: &str) -> Result<MathRequest, RequestError> {
    let body = body.trim_matches(char::from(0)).trim();
    let value: Value =
        serde_json::from_str(body).map_err(|e| RequestError::MalformedBody(e.to_string()))?;
    let obj = value
        .as_object()
        .ok_or_else(|| RequestError::MalformedBody("expected a JSON object".to_string()))?;

    let symbol = match obj.get("operator") {
        Some(Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(RequestError::MalformedBody(format!(
                "operator must be a string, got {}",
                other
            )))
        }
        None => return Err(RequestError::MissingField("operator")),
    };
    let operator = Operator::from_symbol(symbol)?;
    let arg1 = operand(obj.get("arg1"), "arg1")?;
    let arg2 = operand(obj.get("arg2"), "arg2")?;

    Ok(MathRequest::new(operator, arg1, arg2))
}

fn operand(value: Option<&Value>, field: &'static str) -> Result<i64, RequestError> {
    let invalid = |v: &Value| RequestError::InvalidOperand {
        field,
        value: v.to_string(),
    };
    match value {
        None => Err(RequestError::MissingField(field)),
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| invalid(&Value::String(s.clone()))),
        Some(other) => Err(invalid(other)),
    }
}

/// Parse and evaluate a request body without persisting anything.
pub fn handle_math(body: &str) -> MathReply {
    match parse_math_request(body).and_then(|req| req.evaluate()) {
        Ok(calc) => MathReply::from(&calc),
        Err(err) => {
            debug!(error = %err, "rejected math request");
            MathReply::from(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use int64_kernel::ArithmeticError;

    #[test]
    fn test_parse_basic() {
        let req = parse_math_request(r#"{"operator":"+","arg1":2,"arg2":3}"#).unwrap();
        assert_eq!(req, MathRequest::new(Operator::Add, 2, 3));
    }

    #[test]
    fn test_parse_string_operands_and_padding() {
        let body = "  {\"operator\": \"*\", \"arg1\": \"7\", \"arg2\": -6}\0\0\0";
        let req = parse_math_request(body).unwrap();
        assert_eq!(req, MathRequest::new(Operator::Multiply, 7, -6));
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let req =
            parse_math_request(r#"{"operator":"-","arg1":5,"arg2":3,"note":"x"}"#).unwrap();
        assert_eq!(req.operator, Operator::Subtract);
    }

    #[test]
    fn test_parse_missing_field() {
        assert_eq!(
            parse_math_request(r#"{"operator":"+","arg1":2}"#),
            Err(RequestError::MissingField("arg2"))
        );
        assert_eq!(
            parse_math_request(r#"{"arg1":2,"arg2":3}"#),
            Err(RequestError::MissingField("operator"))
        );
    }

    #[test]
    fn test_parse_rejects_non_integer_operands() {
        assert!(matches!(
            parse_math_request(r#"{"operator":"+","arg1":2.5,"arg2":3}"#),
            Err(RequestError::InvalidOperand { field: "arg1", .. })
        ));
        assert!(matches!(
            parse_math_request(r#"{"operator":"+","arg1":2,"arg2":9223372036854775808}"#),
            Err(RequestError::InvalidOperand { field: "arg2", .. })
        ));
    }

    #[test]
    fn test_parse_unknown_operator() {
        assert_eq!(
            parse_math_request(r#"{"operator":"%","arg1":2,"arg2":3}"#),
            Err(RequestError::Arithmetic(ArithmeticError::UnknownOperator(
                "%".to_string()
            )))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_math_request("not json"),
            Err(RequestError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_math_request("[1,2]"),
            Err(RequestError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_handle_math_ok() {
        let reply = handle_math(r#"{"operator":"/","arg1":10,"arg2":2}"#);
        assert_eq!(reply.status_code(), 200);
        assert_eq!(reply.to_json(), r#"{"result":5,"expression":"10 / 2 = 5"}"#);
    }

    #[test]
    fn test_handle_math_division_by_zero() {
        let reply = handle_math(r#"{"operator":"/","arg1":1,"arg2":0}"#);
        assert_eq!(reply.status_code(), 400);
        assert_eq!(reply.to_json(), r#"{"error":"division by zero"}"#);
    }
}
