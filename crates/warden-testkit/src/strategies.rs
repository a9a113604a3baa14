//! Property test strategies for permission types
//!
//! Strategies produce arbitrary but valid values; [`perturb`] derives a
//! request that differs from its input in exactly one field.

use proptest::prelude::*;
use warden_core::{AccountId, Amount, NetworkId, PermissionRequest, VaultId};

// Re-export proptest for convenience
pub use proptest;

/// Field of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionField {
    /// Vault identity
    Vault,
    /// Recipient identity
    Recipient,
    /// Amount
    Amount,
    /// Nonce
    Nonce,
    /// Network discriminator
    Network,
}

/// Strategy over vault identities
pub fn arb_vault_id() -> impl Strategy<Value = VaultId> {
    any::<[u8; 32]>().prop_map(VaultId::from_bytes)
}

/// Strategy over account identities
pub fn arb_account_id() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>().prop_map(AccountId::from_bytes)
}

/// Strategy over non-zero amounts spanning the full range
pub fn arb_amount() -> impl Strategy<Value = Amount> {
    prop_oneof![1..=1_000_000u128, 1..=Amount::MAX]
}

/// Strategy over network discriminators
pub fn arb_network_id() -> impl Strategy<Value = NetworkId> {
    any::<u64>().prop_map(NetworkId::new)
}

/// Strategy over complete, valid permission requests
pub fn arb_request() -> impl Strategy<Value = PermissionRequest> {
    (
        arb_vault_id(),
        arb_account_id(),
        arb_amount(),
        any::<u64>(),
        arb_network_id(),
    )
        .prop_map(|(vault, recipient, amount, nonce, network)| {
            PermissionRequest::new(vault, recipient, amount, nonce, network)
                .expect("arb_amount never yields zero")
        })
}

/// Strategy over request fields
pub fn arb_field() -> impl Strategy<Value = PermissionField> {
    prop_oneof![
        Just(PermissionField::Vault),
        Just(PermissionField::Recipient),
        Just(PermissionField::Amount),
        Just(PermissionField::Nonce),
        Just(PermissionField::Network),
    ]
}

fn flip_byte(mut bytes: [u8; 32], tweak: u64) -> [u8; 32] {
    let index = (tweak % 32) as usize;
    let mask = ((tweak >> 8) as u8) | 1;
    bytes[index] ^= mask;
    bytes
}

/// Copy of `request` with exactly `field` changed
///
/// `tweak` selects how the field changes; any non-zero value yields a
/// request that is different from the input.
pub fn perturb(
    request: &PermissionRequest,
    field: PermissionField,
    tweak: u64,
) -> PermissionRequest {
    let tweak = tweak.max(1);
    let mut vault = request.vault();
    let mut recipient = request.recipient();
    let mut amount = request.amount();
    let mut nonce = request.nonce();
    let mut network = request.network();

    match field {
        PermissionField::Vault => vault = VaultId::from_bytes(flip_byte(vault.0, tweak)),
        PermissionField::Recipient => {
            recipient = AccountId::from_bytes(flip_byte(recipient.0, tweak));
        }
        PermissionField::Amount => {
            let delta = Amount::from(tweak);
            amount = if amount > delta {
                amount - delta
            } else {
                amount + delta
            };
        }
        PermissionField::Nonce => nonce ^= tweak,
        PermissionField::Network => network = NetworkId::new(network.value() ^ tweak),
    }

    PermissionRequest::new(vault, recipient, amount, nonce, network)
        .expect("perturbed amount stays non-zero")
}
