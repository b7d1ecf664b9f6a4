//! Runtime error types.

use std::io;
use std::path::PathBuf;

use int64_kernel::ArithmeticError;
use thiserror::Error;

/// A request that cannot be evaluated. Maps to a 400 reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    #[error("missing field {0:?}")]
    MissingField(&'static str),
    #[error("field {field:?} is not a 64-bit integer: {value}")]
    InvalidOperand { field: &'static str, value: String },
    #[error("unknown protobuf operator value {0}")]
    UnknownProtoOperator(i32),
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

/// Journal storage and replay failures.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid frame length {len} (max {max})")]
    InvalidFrameLength { len: usize, max: usize },
    #[error("truncated frame: {0}")]
    TruncatedFrame(String),
    #[error("protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
    #[error("sequence violation in journal: expected {expected}, got {got}")]
    SequenceViolation { expected: u64, got: u64 },
    #[error("record {sequence} has no request")]
    MissingRequest { sequence: u64 },
    #[error("record {sequence} is invalid: {source}")]
    InvalidRecord {
        sequence: u64,
        #[source]
        source: RequestError,
    },
    #[error("record {sequence} stores result {stored}, recomputed {recomputed}")]
    ResultMismatch {
        sequence: u64,
        stored: i64,
        recomputed: i64,
    },
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure of a session submission.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Journal(#[from] JournalError),
}
