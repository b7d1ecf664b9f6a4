//! Replay: rebuild calculations from journal records.
//!
//! Every record is re-evaluated through the kernel. A stored result that
//! disagrees with the kernel fails the replay; nothing is trusted as-is.

use tracing::{info, warn};

use int64_kernel::hashing::canonical_hash;
use int64_kernel::Calculation;

use crate::error::JournalError;
use crate::proto_bridge::record_to_calculation;
use crate::proto_types::ProtoCalcRecord;

/// Rebuild the calculation list from records.
///
/// 1. Check sequence numbers run 1, 2, 3, ...
/// 2. Re-evaluate each request through the kernel
/// 3. Return (calculations, canonical_hash)
pub fn rebuild(records: &[ProtoCalcRecord]) -> Result<(Vec<Calculation>, String), JournalError> {
    let mut calculations = Vec::with_capacity(records.len());

    for (expected, record) in (1u64..).zip(records) {
        if record.sequence != expected {
            return Err(JournalError::SequenceViolation {
                expected,
                got: record.sequence,
            });
        }

        let stored = record_to_calculation(record)?;
        let recomputed = Calculation::evaluate(stored.operator, stored.arg1, stored.arg2)
            .map_err(|e| JournalError::InvalidRecord {
                sequence: record.sequence,
                source: e.into(),
            })?;
        if recomputed.result != stored.result {
            warn!(sequence = record.sequence, "journal result mismatch");
            return Err(JournalError::ResultMismatch {
                sequence: record.sequence,
                stored: stored.result,
                recomputed: recomputed.result,
            });
        }
        calculations.push(recomputed);
    }

    let hash = canonical_hash(&calculations);
    info!(records = calculations.len(), %hash, "replayed journal");
    Ok((calculations, hash))
}

/// Rebuild and return only the canonical hash.
pub fn rebuild_hash(records: &[ProtoCalcRecord]) -> Result<String, JournalError> {
    let (_, hash) = rebuild(records)?;
    Ok(hash)
}
