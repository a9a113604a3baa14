//! End-to-end withdrawal lifecycle through a real authority
//!
//! Covers the deposit/withdraw/replay path, network binding, foreign
//! signers and the events emitted along the way.

#![allow(clippy::unwrap_used)]

use assert_matches::assert_matches;
use std::sync::Arc;
use warden_authority::{canonical_digest, PermissionSigner};
use warden_core::{AuthError, NetworkId, VaultEvent};
use warden_custody::VaultError;
use warden_testkit::{account, init_tracing, RecordingTransfer, WardenFixture};

#[test]
fn deposit_withdraw_then_replay() {
    init_tracing();
    let fx = WardenFixture::new();
    let recipient = account(0x22);

    fx.vault.deposit(account(0x01), 100).unwrap();
    let sig = fx.permit(recipient, 40, 1);

    assert_eq!(fx.vault.withdraw(recipient, 40, 1, &sig), Ok(60));
    assert_eq!(fx.vault.balance(), 60);

    let digest = canonical_digest(&fx.request(recipient, 40, 1));
    assert!(fx.authority.is_consumed(&digest).unwrap());

    assert_eq!(
        fx.vault.withdraw(recipient, 40, 1, &sig),
        Err(VaultError::Authorization(AuthError::ReplayDetected))
    );
    assert_eq!(fx.vault.balance(), 60);
}

#[test]
fn permission_for_other_network_is_rejected() {
    init_tracing();
    let fx = WardenFixture::new();
    let recipient = account(0x22);
    fx.vault.deposit(account(0x01), 100).unwrap();

    let signed_for_a = fx
        .signer
        .sign(&fx.request_on(recipient, 40, 1, NetworkId::new(1)));
    fx.network.switch_to(NetworkId::new(2));

    assert_eq!(
        fx.vault.withdraw(recipient, 40, 1, &signed_for_a),
        Err(VaultError::Authorization(AuthError::InvalidSigner))
    );
    assert_eq!(fx.vault.balance(), 100);
    assert_eq!(fx.authority.consumed_count(), 0);
}

#[test]
fn foreign_signer_is_rejected() {
    let fx = WardenFixture::new();
    let recipient = account(0x22);
    fx.vault.deposit(account(0x01), 100).unwrap();

    let rogue = PermissionSigner::from_seed(&[0x99; 32]);
    let forged = rogue.sign(&fx.request(recipient, 40, 1));

    assert_eq!(
        fx.vault.withdraw(recipient, 40, 1, &forged),
        Err(VaultError::Authorization(AuthError::InvalidSigner))
    );
    assert_eq!(fx.vault.balance(), 100);
}

#[test]
fn signature_cannot_be_redirected() {
    let fx = WardenFixture::new();
    fx.vault.deposit(account(0x01), 100).unwrap();
    let sig = fx.permit(account(0x22), 40, 1);

    // Different recipient, amount or nonce with the same signature.
    let altered = [
        (account(0x33), 40, 1),
        (account(0x22), 41, 1),
        (account(0x22), 40, 2),
    ];
    for (recipient, amount, nonce) in altered {
        assert_eq!(
            fx.vault.withdraw(recipient, amount, nonce, &sig),
            Err(VaultError::Authorization(AuthError::InvalidSigner))
        );
    }
    assert_eq!(fx.vault.balance(), 100);
}

#[test]
fn permission_is_bound_to_its_vault() {
    let fx = WardenFixture::new();
    let other = WardenFixture::new();
    fx.vault.deposit(account(0x01), 100).unwrap();

    // Same key, same tuple, but signed for a different vault identity.
    let mut foreign_vault = fx.request(account(0x22), 40, 1).vault().0;
    foreign_vault[0] ^= 0xff;
    let request = warden_core::PermissionRequest::new(
        warden_core::VaultId::from_bytes(foreign_vault),
        account(0x22),
        40,
        1,
        NetworkId::new(1),
    )
    .unwrap();
    let sig = other.signer.sign(&request);

    assert_eq!(
        fx.vault.withdraw(account(0x22), 40, 1, &sig),
        Err(VaultError::Authorization(AuthError::InvalidSigner))
    );
}

#[test]
fn insufficient_funds_burns_the_permission() {
    let fx = WardenFixture::new();
    let recipient = account(0x22);
    fx.vault.deposit(account(0x01), 10).unwrap();
    let sig = fx.permit(recipient, 40, 1);

    assert_eq!(
        fx.vault.withdraw(recipient, 40, 1, &sig),
        Err(VaultError::InsufficientFunds {
            requested: 40,
            available: 10
        })
    );

    fx.vault.deposit(account(0x01), 1_000).unwrap();
    assert_eq!(
        fx.vault.withdraw(recipient, 40, 1, &sig),
        Err(VaultError::Authorization(AuthError::ReplayDetected))
    );
    assert_eq!(fx.vault.balance(), 1_010);
}

#[test]
fn events_are_emitted_in_order() {
    let transfers = Arc::new(RecordingTransfer::default());
    let fx = WardenFixture::with_transfer(transfers.clone());
    let recipient = account(0x22);

    fx.vault.deposit(account(0x01), 100).unwrap();
    fx.vault
        .withdraw(recipient, 40, 1, &fx.permit(recipient, 40, 1))
        .unwrap();

    let digest = canonical_digest(&fx.request(recipient, 40, 1));
    assert_eq!(
        fx.events.events(),
        vec![
            VaultEvent::Deposit {
                account: account(0x01),
                amount: 100
            },
            VaultEvent::AuthorizationConsumed { digest, recipient },
            VaultEvent::Withdrawal {
                recipient,
                amount: 40
            },
        ]
    );
    assert_eq!(transfers.transfers(), vec![(recipient, 40)]);
}

#[test]
fn failed_authorization_emits_nothing() {
    let fx = WardenFixture::new();
    fx.vault.deposit(account(0x01), 100).unwrap();

    let rogue = PermissionSigner::from_seed(&[0x99; 32]);
    let forged = rogue.sign(&fx.request(account(0x22), 40, 1));
    assert_matches!(
        fx.vault.withdraw(account(0x22), 40, 1, &forged),
        Err(VaultError::Authorization(_))
    );

    assert_eq!(fx.events.events().len(), 1);
    assert!(fx.events.consumed_digests().is_empty());
}
