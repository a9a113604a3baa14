//! Core value types

pub mod identifiers;

pub use identifiers::{AccountId, Amount, NetworkId, VaultId, IDENTITY_LEN};
