//! Append-only file-backed replay ledger
//!
//! Each consumed digest is one line of lowercase hex. A consumption is only
//! reported after its line has been written and synced, so a digest reported
//! consumed survives a crash. A torn final line (no trailing newline) was
//! never acknowledged and is truncated on open. The same applies while the
//! ledger is open: a write or sync that fails is cut back to the last
//! acknowledged entry before the error is returned.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use warden_core::PermissionDigest;

use super::ReplayLedger;
use crate::errors::LedgerError;

#[derive(Debug)]
struct LedgerFile {
    file: File,
    /// Length of the file up to the last acknowledged entry
    committed_len: u64,
    consumed: HashSet<PermissionDigest>,
}

impl LedgerFile {
    /// Append one entry and sync it, or leave the file at `committed_len`
    fn append(&mut self, digest: &PermissionDigest) -> Result<(), LedgerError> {
        // Drop anything past the last acknowledged entry, e.g. a torn write.
        if self.file.metadata()?.len() != self.committed_len {
            tracing::warn!(
                committed_len = self.committed_len,
                "discarding unacknowledged ledger bytes before append"
            );
            self.file.set_len(self.committed_len)?;
        }

        let line = format!("{}\n", digest.to_hex());
        let written = self
            .file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.sync_data());
        if let Err(err) = written {
            tracing::error!(error = %err, "ledger append failed; rolling back");
            self.file.set_len(self.committed_len)?;
            return Err(err.into());
        }

        self.committed_len += line.len() as u64;
        Ok(())
    }
}

/// Durable replay ledger persisted to a single append-only file
#[derive(Debug)]
pub struct FileReplayLedger {
    path: PathBuf,
    state: Mutex<LedgerFile>,
}

impl FileReplayLedger {
    /// Open (or create) the ledger at `path` and load every recorded digest
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let complete_len = match contents.rfind('\n') {
            Some(idx) => idx + 1,
            None => 0,
        };
        if complete_len < contents.len() {
            tracing::warn!(
                path = %path.display(),
                torn_bytes = contents.len() - complete_len,
                "truncating unacknowledged partial ledger entry"
            );
            file.set_len(complete_len as u64)?;
            file.sync_data()?;
        }

        let mut consumed = HashSet::new();
        for (idx, line) in contents[..complete_len].lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let digest: PermissionDigest = line.parse().map_err(|e| LedgerError::Corrupt {
                line: idx + 1,
                message: format!("{e}"),
            })?;
            consumed.insert(digest);
        }

        tracing::debug!(
            path = %path.display(),
            entries = consumed.len(),
            "replay ledger loaded"
        );

        Ok(Self {
            path,
            state: Mutex::new(LedgerFile {
                file,
                committed_len: complete_len as u64,
                consumed,
            }),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReplayLedger for FileReplayLedger {
    fn is_consumed(&self, digest: &PermissionDigest) -> Result<bool, LedgerError> {
        Ok(self.state.lock().consumed.contains(digest))
    }

    fn try_consume(&self, digest: &PermissionDigest) -> Result<bool, LedgerError> {
        let mut state = self.state.lock();
        if state.consumed.contains(digest) {
            return Ok(false);
        }

        // Persist before publishing the flip in memory.
        state.append(digest)?;
        state.consumed.insert(*digest);
        Ok(true)
    }

    fn consumed_count(&self) -> usize {
        self.state.lock().consumed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger");
        let digest = PermissionDigest::from_bytes([3; 32]);

        {
            let ledger = FileReplayLedger::open(&path).unwrap();
            assert!(ledger.try_consume(&digest).unwrap());
        }

        let reopened = FileReplayLedger::open(&path).unwrap();
        assert!(reopened.is_consumed(&digest).unwrap());
        assert!(!reopened.try_consume(&digest).unwrap());
        assert_eq!(reopened.consumed_count(), 1);
    }

    #[test]
    fn test_torn_tail_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger");
        let digest = PermissionDigest::from_bytes([4; 32]);
        std::fs::write(&path, format!("{}\nabcdef", digest.to_hex())).unwrap();

        let ledger = FileReplayLedger::open(&path).unwrap();
        assert!(ledger.is_consumed(&digest).unwrap());
        assert_eq!(ledger.consumed_count(), 1);

        let other = PermissionDigest::from_bytes([5; 32]);
        assert!(ledger.try_consume(&other).unwrap());
        drop(ledger);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            format!("{}\n{}\n", digest.to_hex(), other.to_hex())
        );
    }

    #[test]
    fn test_partial_tail_while_open_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger");
        let first = PermissionDigest::from_bytes([1; 32]);
        let second = PermissionDigest::from_bytes([2; 32]);

        let ledger = FileReplayLedger::open(&path).unwrap();
        assert!(ledger.try_consume(&first).unwrap());

        // Leftover of an append that failed halfway.
        let mut raw = OpenOptions::new().append(true).open(&path).unwrap();
        raw.write_all(b"0303").unwrap();
        drop(raw);

        assert!(ledger.try_consume(&second).unwrap());
        drop(ledger);

        let reopened = FileReplayLedger::open(&path).unwrap();
        assert!(reopened.is_consumed(&first).unwrap());
        assert!(reopened.is_consumed(&second).unwrap());
        assert_eq!(reopened.consumed_count(), 2);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            format!("{}\n{}\n", first.to_hex(), second.to_hex())
        );
    }

    #[test]
    fn test_corrupt_entry_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger");
        std::fs::write(&path, "not-a-digest\n").unwrap();

        assert_matches!(
            FileReplayLedger::open(&path),
            Err(LedgerError::Corrupt { line: 1, .. })
        );
    }
}
