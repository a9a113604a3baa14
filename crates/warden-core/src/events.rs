//! Observability events
//!
//! Events are emitted for external indexers and are never read back by the
//! authority or the vault.

use serde::{Deserialize, Serialize};

use crate::permission::PermissionDigest;
use crate::types::{AccountId, Amount};

/// Informational record of a state change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaultEvent {
    /// Funds were added to a vault
    Deposit {
        /// Depositing account
        account: AccountId,
        /// Deposited amount
        amount: Amount,
    },
    /// Funds left a vault
    Withdrawal {
        /// Receiving account
        recipient: AccountId,
        /// Withdrawn amount
        amount: Amount,
    },
    /// A permission was consumed by the authority
    AuthorizationConsumed {
        /// Digest that moved to the consumed state
        digest: PermissionDigest,
        /// Recipient named in the consumed permission
        recipient: AccountId,
    },
}

/// Destination for [`VaultEvent`]s
pub trait EventSink: Send + Sync {
    /// Deliver an event. Must not call back into the emitting component.
    fn emit(&self, event: VaultEvent);
}

/// Renders events as `tracing` records under the `warden::events` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: VaultEvent) {
        match event {
            VaultEvent::Deposit { account, amount } => {
                tracing::info!(target: "warden::events", %account, amount, "deposit");
            }
            VaultEvent::Withdrawal { recipient, amount } => {
                tracing::info!(target: "warden::events", %recipient, amount, "withdrawal");
            }
            VaultEvent::AuthorizationConsumed { digest, recipient } => {
                tracing::info!(
                    target: "warden::events",
                    %digest,
                    %recipient,
                    "authorization consumed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = VaultEvent::Withdrawal {
            recipient: AccountId::from_bytes([3; 32]),
            amount: 40,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["withdrawal"]["amount"], 40);
    }
}
