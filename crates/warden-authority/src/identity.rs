//! The single trusted signer identity

use ed25519_dalek::{Signature, VerifyingKey};
use std::fmt;
use warden_core::{AuthError, PermissionDigest, PermissionSignature};

use crate::errors::AuthorityError;

/// Ed25519 verifying key of the only signer whose permissions are accepted
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct AuthorityIdentity(VerifyingKey);

impl AuthorityIdentity {
    /// Wrap an existing verifying key
    pub fn new(key: VerifyingKey) -> Self {
        Self(key)
    }

    /// Decode a 32-byte compressed Edwards point
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, AuthorityError> {
        VerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|e| AuthorityError::InvalidIdentity(e.to_string()))
    }

    /// Public key bytes
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Underlying verifying key
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.0
    }

    /// Check that `signature` was produced by this identity over `digest`
    ///
    /// Uses strict verification, which also rejects small-order keys and
    /// non-canonical signature encodings.
    pub fn verify(
        &self,
        digest: &PermissionDigest,
        signature: &PermissionSignature,
    ) -> Result<(), AuthError> {
        let signature = Signature::from_bytes(&signature.to_bytes());
        self.0
            .verify_strict(digest.as_bytes(), &signature)
            .map_err(|_| AuthError::InvalidSigner)
    }
}

impl fmt::Debug for AuthorityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorityIdentity({})", hex::encode(self.0.as_bytes()))
    }
}

impl fmt::Display for AuthorityIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "authority-{}", hex::encode(&self.0.as_bytes()[..8]))
    }
}
