//! Custody vault errors

use warden_core::{Amount, AuthError};

/// Failure of a vault operation
///
/// Only [`VaultError::InsufficientFunds`], [`VaultError::Transfer`] and a
/// [`VaultError::BalanceOverflow`] from a failed refund can occur after the
/// permission was consumed; every other case leaves all state untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VaultError {
    /// Amounts must be greater than zero
    #[error("amount must be greater than zero")]
    InvalidAmount,

    /// The authority rejected the permission
    #[error("authorization failed: {0}")]
    Authorization(#[from] AuthError),

    /// The permission was valid but the vault cannot cover it
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount the permission asked for
        requested: Amount,
        /// Balance at the time of the check
        available: Amount,
    },

    /// A deposit, or the refund of a failed transfer, would overflow the balance
    #[error("balance overflow")]
    BalanceOverflow,

    /// The external value transfer failed; the balance was restored
    #[error("transfer failed: {message}")]
    Transfer {
        /// Transfer failure description
        message: String,
    },
}

/// Failure reported by a [`ValueTransfer`](crate::ValueTransfer)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransferError {
    /// Description of the failure
    pub message: String,
}

impl TransferError {
    /// Create a transfer error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
