//! Recording and adversarial collaborators
//!
//! Event sinks and value transfers that remember what happened, plus a
//! transfer that re-enters the vault mid-withdrawal.

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use warden_core::{
    AccountId, Amount, EventSink, PermissionDigest, PermissionSignature, VaultEvent,
};
use warden_custody::{CustodyVault, TransferError, ValueTransfer, VaultError};

/// Event sink that keeps every event in order
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<VaultEvent>>,
}

impl RecordingEventSink {
    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<VaultEvent> {
        self.events.lock().clone()
    }

    /// Digests reported by `AuthorizationConsumed` events
    pub fn consumed_digests(&self) -> Vec<PermissionDigest> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                VaultEvent::AuthorizationConsumed { digest, .. } => Some(*digest),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: VaultEvent) {
        self.events.lock().push(event);
    }
}

/// Transfer that records each payout
#[derive(Debug, Default)]
pub struct RecordingTransfer {
    transfers: Mutex<Vec<(AccountId, Amount)>>,
}

impl RecordingTransfer {
    /// Snapshot of all payouts so far
    pub fn transfers(&self) -> Vec<(AccountId, Amount)> {
        self.transfers.lock().clone()
    }

    /// Sum of all payouts
    pub fn total(&self) -> Amount {
        self.transfers.lock().iter().map(|(_, amount)| *amount).sum()
    }
}

impl ValueTransfer for RecordingTransfer {
    fn transfer(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError> {
        self.transfers.lock().push((*recipient, amount));
        Ok(())
    }
}

/// What the reentrant transfer saw when it called back into the vault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReentryObservation {
    /// Vault balance at the moment the transfer started
    pub balance_during_transfer: Amount,
    /// Result of the nested `withdraw`
    pub nested_result: Result<Amount, VaultError>,
}

/// Transfer that re-invokes `withdraw` on its vault before paying out
///
/// The nested call uses the configured nonce and signature together with the
/// recipient and amount of the outer transfer. It fires at most once.
#[derive(Debug)]
pub struct ReentrantTransfer {
    vault: OnceCell<Weak<CustodyVault>>,
    pending: Mutex<Option<(u64, PermissionSignature)>>,
    observations: Mutex<Vec<ReentryObservation>>,
    payouts: RecordingTransfer,
}

impl ReentrantTransfer {
    /// Re-enter with `nonce` and `signature` on the first transfer
    pub fn new(nonce: u64, signature: PermissionSignature) -> Arc<Self> {
        Arc::new(Self {
            vault: OnceCell::new(),
            pending: Mutex::new(Some((nonce, signature))),
            observations: Mutex::new(Vec::new()),
            payouts: RecordingTransfer::default(),
        })
    }

    /// Point the transfer at the vault it should call back into
    pub fn attach(&self, vault: &Arc<CustodyVault>) {
        let _ = self.vault.set(Arc::downgrade(vault));
    }

    /// Nested call outcomes, in order
    pub fn observations(&self) -> Vec<ReentryObservation> {
        self.observations.lock().clone()
    }

    /// Payouts that actually happened
    pub fn payouts(&self) -> Vec<(AccountId, Amount)> {
        self.payouts.transfers()
    }
}

impl ValueTransfer for ReentrantTransfer {
    fn transfer(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError> {
        let pending = self.pending.lock().take();
        let vault = self.vault.get().and_then(Weak::upgrade);

        if let (Some((nonce, signature)), Some(vault)) = (pending, vault) {
            let balance_during_transfer = vault.balance();
            let nested_result = vault.withdraw(*recipient, amount, nonce, &signature);
            tracing::debug!(?nested_result, "reentrant withdraw attempted");
            self.observations.lock().push(ReentryObservation {
                balance_during_transfer,
                nested_result,
            });
        }

        self.payouts.transfer(recipient, amount)
    }
}
