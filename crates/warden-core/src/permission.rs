//! Permission request, digest and signature value types
//!
//! A [`PermissionRequest`] fully determines the digest the authority signs
//! over. The digest computation itself lives in the authority crate; this
//! module only carries the values across the vault/authority boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{ParseIdError, RequestError};
use crate::types::{AccountId, Amount, NetworkId, VaultId};

/// Width in bytes of a permission digest
pub const DIGEST_LEN: usize = 32;

/// Width in bytes of a permission signature
pub const SIGNATURE_LEN: usize = 64;

/// A fully-specified request to move `amount` from `vault` to `recipient`
///
/// Immutable once constructed. `amount` is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionRequest {
    vault: VaultId,
    recipient: AccountId,
    amount: Amount,
    nonce: u64,
    network: NetworkId,
}

impl PermissionRequest {
    /// Build a request, rejecting zero amounts
    pub fn new(
        vault: VaultId,
        recipient: AccountId,
        amount: Amount,
        nonce: u64,
        network: NetworkId,
    ) -> Result<Self, RequestError> {
        if amount == 0 {
            return Err(RequestError::ZeroAmount);
        }

        Ok(Self {
            vault,
            recipient,
            amount,
            nonce,
            network,
        })
    }

    /// Vault the funds leave
    pub fn vault(&self) -> VaultId {
        self.vault
    }

    /// Account the funds go to
    pub fn recipient(&self) -> AccountId {
        self.recipient
    }

    /// Amount in native units
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Caller-chosen nonce
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Network the permission is valid on
    pub fn network(&self) -> NetworkId {
        self.network
    }
}

/// Fixed-width hash identifying one canonical permission
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionDigest(pub [u8; DIGEST_LEN]);

impl PermissionDigest {
    /// Create from raw bytes
    pub const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes
    pub const fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Full lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PermissionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PermissionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionDigest({})", self.to_hex())
    }
}

impl FromStr for PermissionDigest {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
        let bytes: [u8; DIGEST_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| ParseIdError::InvalidLength {
                    expected: DIGEST_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(bytes))
    }
}

/// Opaque signature bytes presented alongside a withdrawal
///
/// The custody side never interprets these bytes; only the authority does.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionSignature(pub [u8; SIGNATURE_LEN]);

impl PermissionSignature {
    /// Create from a byte array
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice of exactly 64 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseIdError> {
        let bytes: [u8; SIGNATURE_LEN] =
            bytes.try_into().map_err(|_| ParseIdError::InvalidLength {
                expected: SIGNATURE_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(bytes))
    }

    /// Get the signature bytes
    pub const fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }

    /// Full lowercase hex rendering
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PermissionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionSignature({})", self.to_hex())
    }
}

impl FromStr for PermissionSignature {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Amount) -> Result<PermissionRequest, RequestError> {
        PermissionRequest::new(
            VaultId::from_bytes([1; 32]),
            AccountId::from_bytes([2; 32]),
            amount,
            7,
            NetworkId::new(1),
        )
    }

    #[test]
    fn test_zero_amount_rejected() {
        assert_eq!(request(0), Err(RequestError::ZeroAmount));
    }

    #[test]
    fn test_accessors() {
        let req = request(40).unwrap();
        assert_eq!(req.vault(), VaultId::from_bytes([1; 32]));
        assert_eq!(req.recipient(), AccountId::from_bytes([2; 32]));
        assert_eq!(req.amount(), 40);
        assert_eq!(req.nonce(), 7);
        assert_eq!(req.network(), NetworkId::new(1));
    }

    #[test]
    fn test_signature_from_slice() {
        assert!(PermissionSignature::from_slice(&[0u8; 64]).is_ok());
        assert_eq!(
            PermissionSignature::from_slice(&[0u8; 63]),
            Err(ParseIdError::InvalidLength {
                expected: 64,
                actual: 63
            })
        );
    }

    #[test]
    fn test_digest_hex_roundtrip() {
        let digest = PermissionDigest::from_bytes([0x5a; 32]);
        let parsed: PermissionDigest = digest.to_hex().parse().unwrap();
        assert_eq!(parsed, digest);
        assert!("5a5a".parse::<PermissionDigest>().is_err());
    }
}
