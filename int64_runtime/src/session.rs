//! Calculation session: evaluate-then-persist.
//!
//! Order for every submission:
//!   1. Evaluate through the kernel (rejections stop here)
//!   2. Append the accepted calculation to the journal
//!   3. Record it in memory
//!
//! Opening a session replays the existing journal.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use int64_kernel::hashing::canonical_hash;
use int64_kernel::Calculation;

use crate::config::RuntimeConfig;
use crate::error::{JournalError, SessionError};
use crate::journal::Journal;
use crate::proto_bridge::calculation_to_record;
use crate::replay;
use crate::request_codec::{parse_math_request, MathReply, MathRequest};

/// A journaled sequence of accepted calculations.
pub struct Session {
    journal: Journal,
    calculations: Vec<Calculation>,
}

impl Session {
    /// Open the journal named by `config` and replay it.
    pub fn open(config: &RuntimeConfig) -> Result<Self, JournalError> {
        let journal = Journal::open(config)?;
        let records = journal.load_all()?;
        let (calculations, _) = replay::rebuild(&records)?;
        Ok(Self {
            journal,
            calculations,
        })
    }

    /// Evaluate `request`; persist and return it if accepted.
    pub fn submit(&mut self, request: &MathRequest) -> Result<Calculation, SessionError> {
        let calc = request.evaluate()?;
        let sequence = self.journal.last_sequence() + 1;
        self.journal
            .append(&calculation_to_record(sequence, &calc))?;
        self.calculations.push(calc);
        debug!(sequence, expression = %calc.expression(), "accepted calculation");
        Ok(calc)
    }

    /// Parse, evaluate and persist a JSON body.
    ///
    /// Bad requests become a `Rejected` reply; only journal failures
    /// surface as errors.
    pub fn handle_math(&mut self, body: &str) -> Result<MathReply, JournalError> {
        let request = match parse_math_request(body) {
            Ok(req) => req,
            Err(err) => return Ok(MathReply::from(&err)),
        };
        match self.submit(&request) {
            Ok(calc) => Ok(MathReply::from(&calc)),
            Err(SessionError::Request(err)) => Ok(MathReply::from(&err)),
            Err(SessionError::Journal(err)) => Err(err),
        }
    }

    /// Full replay from the journal. Replaces the in-memory list.
    pub fn replay_full(&mut self) -> Result<String, JournalError> {
        let records = self.journal.load_all()?;
        let (calculations, hash) = replay::rebuild(&records)?;
        self.calculations = calculations;
        Ok(hash)
    }

    pub fn calculations(&self) -> &[Calculation] {
        &self.calculations
    }

    pub fn current_hash(&self) -> String {
        canonical_hash(&self.calculations)
    }

    pub fn last_sequence(&self) -> u64 {
        self.journal.last_sequence()
    }
}

/// Thread-safe session handle using Mutex.
pub struct SharedSession {
    inner: Mutex<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    // Poisoning is ignored: calculations are only pushed after a successful append.
    fn lock(&self) -> std::sync::MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn submit(&self, request: &MathRequest) -> Result<Calculation, SessionError> {
        self.lock().submit(request)
    }

    pub fn handle_math(&self, body: &str) -> Result<MathReply, JournalError> {
        self.lock().handle_math(body)
    }

    pub fn current_hash(&self) -> String {
        self.lock().current_hash()
    }

    pub fn last_sequence(&self) -> u64 {
        self.lock().last_sequence()
    }
}
