//! External value movement

use warden_core::{AccountId, Amount};

use crate::errors::TransferError;

/// Moves value out of the vault to a recipient
///
/// This is the vault's only outbound call that may run arbitrary code
/// (including calling back into the vault). The vault invokes it only after
/// the permission is consumed and the balance deducted, with no lock held.
pub trait ValueTransfer: Send + Sync {
    /// Send `amount` to `recipient`
    fn transfer(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError>;
}

/// Transfer that only records the movement in the log
///
/// Useful when balances are tracked solely inside the vault.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTransfer;

impl ValueTransfer for LoggingTransfer {
    fn transfer(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError> {
        tracing::debug!(%recipient, amount, "value transferred");
        Ok(())
    }
}
