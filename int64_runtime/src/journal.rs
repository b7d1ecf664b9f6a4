//! Append-only request journal: binary protobuf log.
//!
//! Storage format: length-prefixed protobuf frames.
//!   [4-byte LE length][ProtoCalcRecord bytes][4-byte LE length][...]...
//!
//! Rules:
//!   - Strict append only: no mutation, no deletion, no reordering
//!   - Sequence starts at 1 and increases by exactly 1 (validated on
//!     append and on load)
//!   - Only accepted calculations are journaled
//!   - fsync after every write when configured

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use prost::Message;
use tracing::{debug, info};

use crate::config::RuntimeConfig;
use crate::error::JournalError;
use crate::proto_types::ProtoCalcRecord;

/// Append-only journal backed by a binary file.
pub struct Journal {
    path: PathBuf,
    last_sequence: u64,
    max_frame_len: usize,
    fsync: bool,
}

impl Journal {
    /// Open or create the journal named by `config`.
    /// Reads existing records to determine the last sequence number.
    pub fn open(config: &RuntimeConfig) -> Result<Self, JournalError> {
        let path = config.journal_path.as_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let last_sequence = if path.exists() {
            let records = read_all_from_file(path, config.max_frame_len)?;
            records.last().map(|r| r.sequence).unwrap_or(0)
        } else {
            0
        };
        info!(path = %path.display(), last_sequence, "opened journal");

        Ok(Self {
            path: path.to_path_buf(),
            last_sequence,
            max_frame_len: config.max_frame_len,
            fsync: config.fsync,
        })
    }

    /// Append a single record.
    ///
    /// Validates strict sequence ordering, writes the length-prefixed
    /// frame and fsyncs if configured.
    pub fn append(&mut self, record: &ProtoCalcRecord) -> Result<(), JournalError> {
        let expected = self.last_sequence + 1;
        if record.sequence != expected {
            return Err(JournalError::SequenceViolation {
                expected,
                got: record.sequence,
            });
        }

        let buf = record.encode_to_vec();
        if buf.is_empty() || buf.len() > self.max_frame_len {
            return Err(JournalError::InvalidFrameLength {
                len: buf.len(),
                max: self.max_frame_len,
            });
        }
        // max_frame_len may exceed u32 on 64-bit hosts.
        let len = u32::try_from(buf.len()).map_err(|_| JournalError::InvalidFrameLength {
            len: buf.len(),
            max: u32::MAX as usize,
        })?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        {
            let mut writer = BufWriter::new(&mut file);
            writer.write_all(&len.to_le_bytes())?;
            writer.write_all(&buf)?;
            writer.flush()?;
        }
        if self.fsync {
            file.sync_all()?;
        }

        debug!(sequence = record.sequence, bytes = buf.len(), "appended journal record");
        self.last_sequence = record.sequence;
        Ok(())
    }

    /// Load all records in sequence order.
    pub fn load_all(&self) -> Result<Vec<ProtoCalcRecord>, JournalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        read_all_from_file(&self.path, self.max_frame_len)
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Read every frame from a file, validating frame integrity and sequence.
fn read_all_from_file(path: &Path, max_frame_len: usize) -> Result<Vec<ProtoCalcRecord>, JournalError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut records: Vec<ProtoCalcRecord> = Vec::new();
    let mut len_buf = [0u8; 4];

    loop {
        match reader.read_exact(&mut len_buf) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        }

        let len = u32::from_le_bytes(len_buf) as usize;
        if len == 0 || len > max_frame_len {
            return Err(JournalError::InvalidFrameLength {
                len,
                max: max_frame_len,
            });
        }

        let mut frame = vec![0u8; len];
        reader
            .read_exact(&mut frame)
            .map_err(|e| JournalError::TruncatedFrame(e.to_string()))?;

        let record = ProtoCalcRecord::decode(frame.as_slice())?;
        let expected = records.last().map(|r| r.sequence).unwrap_or(0) + 1;
        if record.sequence != expected {
            return Err(JournalError::SequenceViolation {
                expected,
                got: record.sequence,
            });
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use int64_kernel::{Calculation, Operator};

    use crate::proto_bridge::calculation_to_record;

    fn record(sequence: u64, a: i64, b: i64) -> ProtoCalcRecord {
        let calc = Calculation::evaluate(Operator::Add, a, b).unwrap();
        calculation_to_record(sequence, &calc)
    }

    fn config_in(dir: &tempfile::TempDir) -> RuntimeConfig {
        RuntimeConfig {
            fsync: false,
            ..RuntimeConfig::with_journal_path(dir.path().join("nested").join("requests.log"))
        }
    }

    #[test]
    fn test_open_creates_parent_and_starts_at_zero() {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(&config_in(&dir)).unwrap();
        assert_eq!(journal.last_sequence(), 0);
        assert!(journal.load_all().unwrap().is_empty());
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_append_then_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        {
            let mut journal = Journal::open(&config).unwrap();
            journal.append(&record(1, 2, 3)).unwrap();
            journal.append(&record(2, 4, 5)).unwrap();
        }
        let journal = Journal::open(&config).unwrap();
        assert_eq!(journal.last_sequence(), 2);
        let records = journal.load_all().unwrap();
        assert_eq!(records, vec![record(1, 2, 3), record(2, 4, 5)]);
    }

    #[test]
    fn test_append_rejects_sequence_gap() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = Journal::open(&config_in(&dir)).unwrap();
        assert!(matches!(
            journal.append(&record(2, 1, 1)),
            Err(JournalError::SequenceViolation { expected: 1, got: 2 })
        ));
        assert_eq!(journal.last_sequence(), 0);
    }

    #[test]
    fn test_zero_length_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(config.journal_path.parent().unwrap()).unwrap();
        fs::write(&config.journal_path, 0u32.to_le_bytes()).unwrap();
        assert!(matches!(
            Journal::open(&config),
            Err(JournalError::InvalidFrameLength { len: 0, .. })
        ));
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        fs::create_dir_all(config.journal_path.parent().unwrap()).unwrap();
        let mut bytes = 10u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0x08, 0x01]);
        fs::write(&config.journal_path, bytes).unwrap();
        assert!(matches!(
            Journal::open(&config),
            Err(JournalError::TruncatedFrame(_))
        ));
    }
}
