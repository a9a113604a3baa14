//! Error types shared across Warden crates
//!
//! `AuthError` is the contract between the custody vault and whatever
//! `Authorizer` it is wired to, so it lives here rather than in the
//! authority crate. Every variant is terminal for the call that produced it.

use serde::{Deserialize, Serialize};

/// Failure of an authorization attempt or of authority bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AuthError {
    /// Signature does not verify against the registered authority for this digest
    #[error("invalid signer: signature does not match the registered authority")]
    InvalidSigner,

    /// The permission digest was already consumed
    #[error("replay detected: permission already consumed")]
    ReplayDetected,

    /// No authority identity has been registered yet
    #[error("authority identity not initialized")]
    NotInitialized,

    /// The authority identity was already registered
    #[error("authority identity already initialized")]
    AlreadyInitialized,

    /// The replay ledger could not record or read a consumption
    #[error("replay ledger failure: {message}")]
    Ledger {
        /// Description of the ledger failure
        message: String,
    },
}

impl AuthError {
    /// Create a ledger failure
    pub fn ledger(message: impl Into<String>) -> Self {
        Self::Ledger {
            message: message.into(),
        }
    }
}

/// A permission request could not be constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Permissions for a zero amount are malformed
    #[error("permission amount must be greater than zero")]
    ZeroAmount,
}

/// An identifier could not be parsed from its textual form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    /// Input was not valid hex
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Required byte length
        expected: usize,
        /// Decoded byte length
        actual: usize,
    },
}
