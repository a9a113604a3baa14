//! Identifier types shared by the authority and the custody vault
//!
//! Vault and account identities are fixed-width 32-byte values so that the
//! canonical permission encoding never needs length prefixes. Network
//! identities are 64-bit discriminators (chain id equivalent).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseIdError;

/// Amount of the custody asset, in its native unit.
///
/// Amounts are opaque integers; no decimal or rounding policy applies.
pub type Amount = u128;

/// Width in bytes of vault and account identities.
pub const IDENTITY_LEN: usize = 32;

fn decode_identity(s: &str) -> Result<[u8; IDENTITY_LEN], ParseIdError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| ParseIdError::InvalidHex(e.to_string()))?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ParseIdError::InvalidLength {
            expected: IDENTITY_LEN,
            actual: bytes.len(),
        })
}

macro_rules! byte_identity {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub [u8; IDENTITY_LEN]);

        impl $name {
            /// Create from raw bytes
            pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
                Self(bytes)
            }

            /// Get the raw bytes
            pub const fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
                &self.0
            }

            /// Full lowercase hex rendering
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "-{}"), hex::encode(&self.0[..8]))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                decode_identity(s).map(Self)
            }
        }

        impl From<[u8; IDENTITY_LEN]> for $name {
            fn from(bytes: [u8; IDENTITY_LEN]) -> Self {
                Self(bytes)
            }
        }
    };
}

byte_identity!(
    /// Identity of a custody vault instance
    ///
    /// Bound into every permission so a signature issued for one vault can
    /// never be redeemed against another.
    VaultId,
    "vault"
);

byte_identity!(
    /// Identity of an account that deposits into or receives from a vault
    AccountId,
    "account"
);

/// Network/environment discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetworkId(pub u64);

impl NetworkId {
    /// Create a new network id
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "network-{}", self.0)
    }
}

impl From<u64> for NetworkId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
