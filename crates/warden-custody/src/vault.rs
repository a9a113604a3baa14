//! Custody vault
//!
//! The vault holds a balance and moves value only after its [`Authorizer`]
//! has verified and consumed the exact permission being redeemed.
//!
//! ## Ordering
//!
//! `withdraw` runs: authorize (consumes the permission), check and deduct
//! the balance under the balance lock, release the lock, transfer, emit.
//! Both state changes are committed before the transfer, which is the only
//! step that can re-enter the vault.

use parking_lot::Mutex;
use std::sync::Arc;
use warden_core::{
    AccountId, Amount, Authorizer, ConfigError, EventSink, NetworkEnvironment,
    PermissionRequest, PermissionSignature, VaultEvent, VaultId, VaultSettings,
};

use crate::errors::VaultError;
use crate::transfer::ValueTransfer;

/// Holds funds and releases them against authorized permissions
pub struct CustodyVault {
    id: VaultId,
    authorizer: Arc<dyn Authorizer>,
    network: Arc<dyn NetworkEnvironment>,
    transfer: Arc<dyn ValueTransfer>,
    events: Arc<dyn EventSink>,
    balance: Mutex<Amount>,
}

impl CustodyVault {
    /// Create an empty vault bound to `authorizer` for its whole lifetime
    pub fn new(
        id: VaultId,
        authorizer: Arc<dyn Authorizer>,
        network: Arc<dyn NetworkEnvironment>,
        transfer: Arc<dyn ValueTransfer>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        tracing::info!(vault = %id, "custody vault created");
        Self {
            id,
            authorizer,
            network,
            transfer,
            events,
            balance: Mutex::new(0),
        }
    }

    /// Create a vault from configuration, fixed to the configured network
    pub fn from_settings(
        settings: &VaultSettings,
        authorizer: Arc<dyn Authorizer>,
        transfer: Arc<dyn ValueTransfer>,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            settings.vault_id()?,
            authorizer,
            Arc::new(settings.network_id()),
            transfer,
            events,
        ))
    }

    /// Identity bound into every permission this vault redeems
    pub fn id(&self) -> VaultId {
        self.id
    }

    /// Current balance
    pub fn balance(&self) -> Amount {
        *self.balance.lock()
    }

    /// Add funds; returns the new balance
    ///
    /// Deposits are not privileged and need no permission.
    pub fn deposit(&self, depositor: AccountId, amount: Amount) -> Result<Amount, VaultError> {
        if amount == 0 {
            return Err(VaultError::InvalidAmount);
        }

        let new_balance = {
            let mut balance = self.balance.lock();
            *balance = balance
                .checked_add(amount)
                .ok_or(VaultError::BalanceOverflow)?;
            *balance
        };

        tracing::info!(
            vault = %self.id,
            %depositor,
            amount,
            balance = new_balance,
            "deposit accepted"
        );
        self.events.emit(VaultEvent::Deposit {
            account: depositor,
            amount,
        });
        Ok(new_balance)
    }

    /// Redeem a signed permission; returns the remaining balance
    ///
    /// Authorization failures leave the vault untouched. Once authorization
    /// succeeds the permission is spent even if the vault cannot cover it.
    pub fn withdraw(
        &self,
        recipient: AccountId,
        amount: Amount,
        nonce: u64,
        signature: &PermissionSignature,
    ) -> Result<Amount, VaultError> {
        let network = self.network.current_network();
        let request = PermissionRequest::new(self.id, recipient, amount, nonce, network)
            .map_err(|_| VaultError::InvalidAmount)?;

        self.authorizer.authorize(&request, signature)?;

        let remaining = {
            let mut balance = self.balance.lock();
            if *balance < amount {
                tracing::warn!(
                    vault = %self.id,
                    requested = amount,
                    available = *balance,
                    "authorized withdrawal exceeds balance; permission burned"
                );
                return Err(VaultError::InsufficientFunds {
                    requested: amount,
                    available: *balance,
                });
            }
            *balance -= amount;
            *balance
        };

        if let Err(err) = self.transfer.transfer(&recipient, amount) {
            let mut balance = self.balance.lock();
            let Some(restored) = balance.checked_add(amount) else {
                tracing::error!(
                    vault = %self.id,
                    %recipient,
                    amount,
                    balance = *balance,
                    error = %err,
                    "transfer failed and balance cannot absorb the refund"
                );
                return Err(VaultError::BalanceOverflow);
            };
            *balance = restored;
            tracing::warn!(
                vault = %self.id,
                %recipient,
                amount,
                error = %err,
                "transfer failed; balance restored, permission stays consumed"
            );
            return Err(VaultError::Transfer {
                message: err.to_string(),
            });
        }

        tracing::info!(
            vault = %self.id,
            %recipient,
            amount,
            nonce,
            %network,
            "withdrawal executed"
        );
        self.events.emit(VaultEvent::Withdrawal { recipient, amount });
        Ok(remaining)
    }
}

impl std::fmt::Debug for CustodyVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustodyVault")
            .field("id", &self.id)
            .field("balance", &self.balance())
            .finish()
    }
}
