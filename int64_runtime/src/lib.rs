#![forbid(unsafe_code)]

//! Int64 Runtime
//!
//! Wraps the int64 kernel with a protobuf wire format, a JSON request
//! codec, an append-only request journal, replay and sessions.
//!
//! No arithmetic lives here: every result comes from the kernel.

pub mod config;
pub mod error;
pub mod journal;
pub mod proto_bridge;
pub mod proto_types;
pub mod replay;
pub mod request_codec;
pub mod session;
