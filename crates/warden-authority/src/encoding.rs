//! Canonical permission encoding and digest
//!
//! The encoding is fixed-width and order-fixed so that any off-chain signer
//! can reproduce it bit for bit:
//!
//! ```text
//! "warden.permission.v1"            20 bytes
//! 0x01 || vault      32 bytes
//! 0x02 || recipient  32 bytes
//! 0x03 || amount     u128 big-endian
//! 0x04 || nonce      u64 big-endian
//! 0x05 || network    u64 big-endian
//! ```
//!
//! The digest is SHA-256 over those 121 bytes.

use sha2::{Digest, Sha256};
use warden_core::{PermissionDigest, PermissionRequest, DIGEST_LEN};

/// Domain-separation tag prefixed to every encoded permission
pub const DOMAIN_TAG: &[u8; 20] = b"warden.permission.v1";

/// Field tag for the vault identity
pub const TAG_VAULT: u8 = 0x01;
/// Field tag for the recipient identity
pub const TAG_RECIPIENT: u8 = 0x02;
/// Field tag for the amount
pub const TAG_AMOUNT: u8 = 0x03;
/// Field tag for the nonce
pub const TAG_NONCE: u8 = 0x04;
/// Field tag for the network discriminator
pub const TAG_NETWORK: u8 = 0x05;

/// Length of the canonical encoding
pub const ENCODED_LEN: usize = 20 + (1 + 32) + (1 + 32) + (1 + 16) + (1 + 8) + (1 + 8);

fn put(out: &mut [u8], cursor: &mut usize, bytes: &[u8]) {
    out[*cursor..*cursor + bytes.len()].copy_from_slice(bytes);
    *cursor += bytes.len();
}

/// Encode a request into its canonical byte form
pub fn canonical_encoding(request: &PermissionRequest) -> [u8; ENCODED_LEN] {
    let mut out = [0u8; ENCODED_LEN];
    let mut cursor = 0;

    put(&mut out, &mut cursor, DOMAIN_TAG);
    put(&mut out, &mut cursor, &[TAG_VAULT]);
    put(&mut out, &mut cursor, request.vault().as_bytes());
    put(&mut out, &mut cursor, &[TAG_RECIPIENT]);
    put(&mut out, &mut cursor, request.recipient().as_bytes());
    put(&mut out, &mut cursor, &[TAG_AMOUNT]);
    put(&mut out, &mut cursor, &request.amount().to_be_bytes());
    put(&mut out, &mut cursor, &[TAG_NONCE]);
    put(&mut out, &mut cursor, &request.nonce().to_be_bytes());
    put(&mut out, &mut cursor, &[TAG_NETWORK]);
    put(&mut out, &mut cursor, &request.network().value().to_be_bytes());

    debug_assert_eq!(cursor, ENCODED_LEN);
    out
}

/// Compute the digest an authority signs over for `request`
///
/// Pure: equal requests always yield equal digests.
pub fn canonical_digest(request: &PermissionRequest) -> PermissionDigest {
    let mut hasher = Sha256::new();
    hasher.update(canonical_encoding(request));
    let mut output = [0u8; DIGEST_LEN];
    output.copy_from_slice(&hasher.finalize());
    PermissionDigest::from_bytes(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use warden_core::{AccountId, NetworkId, VaultId};

    fn request() -> PermissionRequest {
        PermissionRequest::new(
            VaultId::from_bytes([0x11; 32]),
            AccountId::from_bytes([0x22; 32]),
            40,
            1,
            NetworkId::new(1),
        )
        .unwrap()
    }

    #[test]
    fn test_encoding_layout() {
        let encoded = canonical_encoding(&request());
        assert_eq!(encoded.len(), 121);
        assert_eq!(&encoded[..20], DOMAIN_TAG);
        assert_eq!(encoded[20], TAG_VAULT);
        assert_eq!(&encoded[21..53], &[0x11; 32]);
        assert_eq!(encoded[53], TAG_RECIPIENT);
        assert_eq!(&encoded[54..86], &[0x22; 32]);
        assert_eq!(encoded[86], TAG_AMOUNT);
        assert_eq!(&encoded[87..103], &40u128.to_be_bytes());
        assert_eq!(encoded[103], TAG_NONCE);
        assert_eq!(&encoded[104..112], &1u64.to_be_bytes());
        assert_eq!(encoded[112], TAG_NETWORK);
        assert_eq!(&encoded[113..121], &1u64.to_be_bytes());
    }

    #[test]
    fn test_digest_golden_vector() {
        assert_eq!(
            canonical_digest(&request()).to_hex(),
            "bcb5fefce160e3d19650d67c5313e074a6b2123b6388cd600ef1281a8fb23a95"
        );
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(canonical_digest(&request()), canonical_digest(&request()));
    }

    fn arb_request() -> impl Strategy<Value = PermissionRequest> {
        (
            any::<[u8; 32]>(),
            any::<[u8; 32]>(),
            1..=u128::MAX,
            any::<u64>(),
            any::<u64>(),
        )
            .prop_map(|(vault, recipient, amount, nonce, network)| {
                PermissionRequest::new(
                    VaultId::from_bytes(vault),
                    AccountId::from_bytes(recipient),
                    amount,
                    nonce,
                    NetworkId::new(network),
                )
                .unwrap()
            })
    }

    proptest! {
        #[test]
        fn prop_encoding_places_every_field(request in arb_request()) {
            let encoded = canonical_encoding(&request);
            let fields: [(&[u8], Vec<u8>); 5] = [
                (&encoded[21..53], request.vault().as_bytes().to_vec()),
                (&encoded[54..86], request.recipient().as_bytes().to_vec()),
                (&encoded[87..103], request.amount().to_be_bytes().to_vec()),
                (&encoded[104..112], request.nonce().to_be_bytes().to_vec()),
                (&encoded[113..121], request.network().value().to_be_bytes().to_vec()),
            ];
            for (slot, expected) in fields {
                prop_assert_eq!(slot, expected.as_slice());
            }
        }

        #[test]
        fn prop_digest_tracks_nonce_and_network(
            request in arb_request(),
            nonce in any::<u64>(),
            network in any::<u64>(),
        ) {
            let rebuilt = PermissionRequest::new(
                request.vault(),
                request.recipient(),
                request.amount(),
                nonce,
                NetworkId::new(network),
            )
            .unwrap();
            let same_context =
                nonce == request.nonce() && network == request.network().value();
            prop_assert_eq!(
                canonical_digest(&request) == canonical_digest(&rebuilt),
                same_context
            );
        }
    }
}
