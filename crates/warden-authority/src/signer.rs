//! Reference permission signer
//!
//! Produces signatures over the canonical digest exactly as the authority
//! expects them. Key custody is the caller's concern; this type only holds a
//! key for the duration it is kept alive.

use ed25519_dalek::{Signer, SigningKey};
use std::fmt;
use warden_core::{PermissionDigest, PermissionRequest, PermissionSignature};

use crate::encoding::canonical_digest;
use crate::identity::AuthorityIdentity;

/// Signs permission requests with an Ed25519 key
#[derive(Clone)]
pub struct PermissionSigner {
    key: SigningKey,
}

impl PermissionSigner {
    /// Wrap an existing signing key
    pub fn new(key: SigningKey) -> Self {
        Self { key }
    }

    /// Derive the signing key from a 32-byte seed
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
        }
    }

    /// Identity that verifies this signer's permissions
    pub fn identity(&self) -> AuthorityIdentity {
        AuthorityIdentity::new(self.key.verifying_key())
    }

    /// Sign the canonical digest of `request`
    pub fn sign(&self, request: &PermissionRequest) -> PermissionSignature {
        self.sign_digest(&canonical_digest(request))
    }

    /// Sign an already computed digest
    pub fn sign_digest(&self, digest: &PermissionDigest) -> PermissionSignature {
        PermissionSignature::from_bytes(self.key.sign(digest.as_bytes()).to_bytes())
    }
}

impl fmt::Debug for PermissionSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Don't expose signing key in debug output
        f.debug_struct("PermissionSigner")
            .field("key", &"[REDACTED]")
            .field("identity", &self.identity())
            .finish()
    }
}
