//! Authority-side error types
//!
//! Authorization verdicts are reported with [`warden_core::AuthError`]; the
//! types here cover ledger storage and construction from configuration.

use warden_core::{AuthError, ConfigError};

/// Replay ledger storage failure
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The backing store could not be read or written
    #[error("ledger io error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted entry could not be decoded
    #[error("corrupt ledger entry at line {line}: {message}")]
    Corrupt {
        /// 1-based line number of the bad entry
        line: usize,
        /// Decoding failure
        message: String,
    },
}

impl From<LedgerError> for AuthError {
    fn from(err: LedgerError) -> Self {
        AuthError::ledger(err.to_string())
    }
}

/// Failure to construct an authority
#[derive(Debug, thiserror::Error)]
pub enum AuthorityError {
    /// Configuration was unusable
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Verifying key bytes are not a valid Ed25519 point
    #[error("invalid authority identity: {0}")]
    InvalidIdentity(String),

    /// The replay ledger could not be opened
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Bootstrap failed
    #[error(transparent)]
    Auth(#[from] AuthError),
}
