//! Warden Custody: the vault that holds and releases funds
//!
//! The vault verifies nothing cryptographic. Every withdrawal is handed to a
//! [`warden_core::Authorizer`] as a fully-specified request, and value moves
//! only after that authorizer has consumed the permission. This crate does not
//! depend on any signature or hash library.

pub mod errors;
pub mod transfer;
pub mod vault;

pub use errors::{TransferError, VaultError};
pub use transfer::{LoggingTransfer, ValueTransfer};
pub use vault::CustodyVault;
