//! Warden Authority: the sole arbiter of withdrawal permissions
//!
//! This crate owns everything cryptographic in Warden:
//!
//! - **Canonical encoding**: domain-separated, fixed-width permission encoding
//!   and its SHA-256 digest ([`canonical_digest`])
//! - **Identity**: the write-once Ed25519 authority identity
//! - **Replay ledgers**: one-way consumed flags, in memory or on disk
//! - **Authority**: [`AuthorizationAuthority`], the [`warden_core::Authorizer`]
//!   implementation the custody vault delegates to
//! - **Signer**: [`PermissionSigner`], the reference producer of signatures
//!   for the canonical encoding

pub mod authority;
pub mod encoding;
pub mod errors;
pub mod identity;
pub mod ledger;
pub mod signer;

pub use authority::AuthorizationAuthority;
pub use encoding::{canonical_digest, canonical_encoding, DOMAIN_TAG, ENCODED_LEN};
pub use errors::{AuthorityError, LedgerError};
pub use identity::AuthorityIdentity;
pub use ledger::{FileReplayLedger, MemoryReplayLedger, ReplayLedger};
pub use signer::PermissionSigner;
