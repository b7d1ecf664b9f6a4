//! Proto ↔ kernel conversion bridge.
//!
//! Unset or unknown operator values are rejected, never defaulted.

use int64_kernel::{Calculation, Operator};

use crate::error::{JournalError, RequestError};
use crate::proto_types::{ProtoCalcRecord, ProtoCalcRequest, ProtoOperator};
use crate::request_codec::MathRequest;

pub fn operator_to_proto(op: Operator) -> ProtoOperator {
    match op {
        Operator::Add => ProtoOperator::Add,
        Operator::Subtract => ProtoOperator::Subtract,
        Operator::Multiply => ProtoOperator::Multiply,
        Operator::Divide => ProtoOperator::Divide,
    }
}

/// Resolve a raw protobuf enum value.
pub fn proto_to_operator(raw: i32) -> Result<Operator, RequestError> {
    match ProtoOperator::try_from(raw) {
        Ok(ProtoOperator::Add) => Ok(Operator::Add),
        Ok(ProtoOperator::Subtract) => Ok(Operator::Subtract),
        Ok(ProtoOperator::Multiply) => Ok(Operator::Multiply),
        Ok(ProtoOperator::Divide) => Ok(Operator::Divide),
        Ok(ProtoOperator::Unspecified) | Err(_) => Err(RequestError::UnknownProtoOperator(raw)),
    }
}

pub fn request_to_proto(req: &MathRequest) -> ProtoCalcRequest {
    ProtoCalcRequest {
        operator: operator_to_proto(req.operator) as i32,
        arg1: req.arg1,
        arg2: req.arg2,
    }
}

pub fn proto_to_request(proto: &ProtoCalcRequest) -> Result<MathRequest, RequestError> {
    Ok(MathRequest::new(
        proto_to_operator(proto.operator)?,
        proto.arg1,
        proto.arg2,
    ))
}

/// Wrap an accepted calculation as the journal record at `sequence`.
pub fn calculation_to_record(sequence: u64, calc: &Calculation) -> ProtoCalcRecord {
    ProtoCalcRecord {
        sequence,
        request: Some(request_to_proto(&MathRequest::new(
            calc.operator,
            calc.arg1,
            calc.arg2,
        ))),
        result: calc.result,
    }
}

/// Unwrap a journal record. The stored result is taken as-is; replay
/// is responsible for checking it.
pub fn record_to_calculation(record: &ProtoCalcRecord) -> Result<Calculation, JournalError> {
    let proto = record.request.as_ref().ok_or(JournalError::MissingRequest {
        sequence: record.sequence,
    })?;
    let req = proto_to_request(proto).map_err(|source| JournalError::InvalidRecord {
        sequence: record.sequence,
        source,
    })?;
    Ok(Calculation {
        operator: req.operator,
        arg1: req.arg1,
        arg2: req.arg2,
        result: record.result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_operator_mapping_is_bijective() {
        for op in Operator::ALL {
            let raw = operator_to_proto(op) as i32;
            assert_eq!(proto_to_operator(raw), Ok(op));
        }
    }

    #[test]
    fn test_unspecified_and_unknown_operator_rejected() {
        assert_eq!(proto_to_operator(0), Err(RequestError::UnknownProtoOperator(0)));
        assert_eq!(proto_to_operator(99), Err(RequestError::UnknownProtoOperator(99)));
    }

    #[test]
    fn test_record_survives_wire_encoding() {
        let calc = Calculation::evaluate(Operator::Multiply, i64::MIN, -1).unwrap();
        let record = calculation_to_record(7, &calc);
        let decoded = ProtoCalcRecord::decode(record.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded.sequence, 7);
        assert_eq!(record_to_calculation(&decoded).unwrap(), calc);
    }

    #[test]
    fn test_record_without_request_rejected() {
        let record = ProtoCalcRecord {
            sequence: 3,
            request: None,
            result: 0,
        };
        assert!(matches!(
            record_to_calculation(&record),
            Err(JournalError::MissingRequest { sequence: 3 })
        ));
    }
}
