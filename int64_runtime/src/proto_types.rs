//! Hand-written protobuf types for the calculation wire format.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//!
//! ```proto
//! enum Operator { OPERATOR_UNSPECIFIED = 0; ADD = 1; SUBTRACT = 2; MULTIPLY = 3; DIVIDE = 4; }
//! message CalcRequest { Operator operator = 1; sint64 arg1 = 2; sint64 arg2 = 3; }
//! message CalcRecord  { uint64 sequence = 1; CalcRequest request = 2; sint64 result = 3; }
//! ```

use prost::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOperator {
    Unspecified = 0,
    Add = 1,
    Subtract = 2,
    Multiply = 3,
    Divide = 4,
}

// ── Request ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoCalcRequest {
    #[prost(enumeration = "ProtoOperator", tag = "1")]
    pub operator: i32,
    #[prost(sint64, tag = "2")]
    pub arg1: i64,
    #[prost(sint64, tag = "3")]
    pub arg2: i64,
}

// ── Journal record ─────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoCalcRecord {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(message, optional, tag = "2")]
    pub request: Option<ProtoCalcRequest>,
    #[prost(sint64, tag = "3")]
    pub result: i64,
}
