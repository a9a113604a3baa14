//! Warden Core: shared vocabulary for signed one-time withdrawal permissions
//!
//! This crate defines the values and traits that cross the boundary between
//! the custody vault and the authorization authority:
//!
//! - **Identifiers**: [`VaultId`], [`AccountId`], [`NetworkId`]
//! - **Permissions**: [`PermissionRequest`], [`PermissionDigest`], [`PermissionSignature`]
//! - **Seams**: [`Authorizer`], [`NetworkEnvironment`], [`EventSink`]
//! - **Configuration**: [`WardenConfig`]
//!
//! It contains no signature or hash implementation, so that the
//! custody crate can depend on it without pulling in any cryptography.

pub mod config;
pub mod effects;
pub mod errors;
pub mod events;
pub mod permission;
pub mod types;

pub use config::{AuthoritySettings, ConfigError, VaultSettings, WardenConfig};
pub use effects::{Authorizer, NetworkEnvironment, SwitchableNetwork};
pub use errors::{AuthError, ParseIdError, RequestError};
pub use events::{EventSink, TracingEventSink, VaultEvent};
pub use permission::{
    PermissionDigest, PermissionRequest, PermissionSignature, DIGEST_LEN, SIGNATURE_LEN,
};
pub use types::{AccountId, Amount, NetworkId, VaultId, IDENTITY_LEN};
