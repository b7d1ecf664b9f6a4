//! Int64 Kernel: Canonical Hashing
//!
//! Deterministic canonical serialization + SHA-256 hashing of
//! calculation lists. Produces byte-identical output across platforms.
//!
//! Rules:
//!   - Calculations kept in input order (order is part of identity)
//!   - Calculation fields in fixed order: operator, arg1, arg2, result
//!   - UTF-8 JSON, no whitespace, integers only

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::calculation::Calculation;
use crate::KERNEL_VERSION;

/// Canonical serialization of a calculation list to UTF-8 JSON bytes.
/// `kernel_version` is the first field.
pub fn canonical_serialize(calculations: &[Calculation]) -> Vec<u8> {
    // Value's Display is compact JSON and cannot fail.
    build_canonical_value(calculations).to_string().into_bytes()
}

/// SHA-256 of the canonical serialization. Lowercase hex string.
pub fn canonical_hash(calculations: &[Calculation]) -> String {
    let bytes = canonical_serialize(calculations);
    let digest = Sha256::digest(&bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Build the canonical value in strict field order.
///
/// Relies on `preserve_order`: `Map` keeps insertion order.
fn build_canonical_value(calculations: &[Calculation]) -> Value {
    let list: Vec<Value> = calculations
        .iter()
        .map(|c| {
            let mut calc_map = Map::new();
            calc_map.insert(
                "operator".to_string(),
                Value::String(c.operator.symbol().to_string()),
            );
            calc_map.insert("arg1".to_string(), Value::Number(c.arg1.into()));
            calc_map.insert("arg2".to_string(), Value::Number(c.arg2.into()));
            calc_map.insert("result".to_string(), Value::Number(c.result.into()));
            Value::Object(calc_map)
        })
        .collect();

    let mut root = Map::new();
    root.insert(
        "kernel_version".to_string(),
        Value::Number(KERNEL_VERSION.into()),
    );
    root.insert("calculations".to_string(), Value::Array(list));
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::Operator;

    fn sample() -> Vec<Calculation> {
        vec![
            Calculation::evaluate(Operator::Add, 2, 3).unwrap(),
            Calculation::evaluate(Operator::Divide, -7, 2).unwrap(),
        ]
    }

    #[test]
    fn test_canonical_serialize_field_order() {
        let json = String::from_utf8(canonical_serialize(&sample())).unwrap();
        assert_eq!(
            json,
            r#"{"kernel_version":1,"calculations":[{"operator":"+","arg1":2,"arg2":3,"result":5},{"operator":"/","arg1":-7,"arg2":2,"result":-3}]}"#
        );
    }

    #[test]
    fn test_empty_list_hash() {
        assert_eq!(
            String::from_utf8(canonical_serialize(&[])).unwrap(),
            r#"{"kernel_version":1,"calculations":[]}"#
        );
        assert_eq!(
            canonical_hash(&[]),
            "db8bcc8308df746fe27c8271768b10f4bc9b41ee4be0829cb8d403ebae1fc414"
        );
    }

    #[test]
    fn test_hash_is_lowercase_hex_and_stable() {
        let h1 = canonical_hash(&sample());
        let h2 = canonical_hash(&sample());
        assert_eq!(h1, h2);
        assert!(h1.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_order_changes_hash() {
        let mut reversed = sample();
        reversed.reverse();
        assert_ne!(canonical_hash(&sample()), canonical_hash(&reversed));
    }
}
