//! Replay ledgers
//!
//! A replay ledger maps permission digests to a consumed flag that starts
//! false and can only ever become true. There is no operation
//! that clears an entry.
//!
//! ## Lock Usage
//!
//! Both implementations use `parking_lot::Mutex` around their state. The
//! lock is held only for the test-and-set itself (plus the durable write for
//! [`FileReplayLedger`]) and never across a call into another component.

mod file;

pub use file::FileReplayLedger;

use parking_lot::Mutex;
use std::collections::HashSet;
use warden_core::PermissionDigest;

use crate::errors::LedgerError;

/// One-way consumed-flag store keyed by permission digest
pub trait ReplayLedger: Send + Sync {
    /// Whether `digest` has been consumed
    fn is_consumed(&self, digest: &PermissionDigest) -> Result<bool, LedgerError>;

    /// Atomically test and set the consumed flag
    ///
    /// Returns `Ok(true)` when this call moved `digest` from unconsumed to
    /// consumed, `Ok(false)` when it was already consumed. When `Ok(true)` is
    /// returned the flip is committed and visible to every later call.
    fn try_consume(&self, digest: &PermissionDigest) -> Result<bool, LedgerError>;

    /// Number of consumed digests
    fn consumed_count(&self) -> usize;
}

/// In-memory replay ledger
#[derive(Debug, Default)]
pub struct MemoryReplayLedger {
    consumed: Mutex<HashSet<PermissionDigest>>,
}

impl MemoryReplayLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayLedger for MemoryReplayLedger {
    fn is_consumed(&self, digest: &PermissionDigest) -> Result<bool, LedgerError> {
        Ok(self.consumed.lock().contains(digest))
    }

    fn try_consume(&self, digest: &PermissionDigest) -> Result<bool, LedgerError> {
        Ok(self.consumed.lock().insert(*digest))
    }

    fn consumed_count(&self) -> usize {
        self.consumed.lock().len()
    }
}
