//! Wired-up authority + vault fixtures with deterministic keys

use std::sync::Arc;
use warden_authority::{AuthorizationAuthority, MemoryReplayLedger, PermissionSigner};
use warden_core::{
    AccountId, Amount, NetworkEnvironment, NetworkId, PermissionRequest, PermissionSignature,
    SwitchableNetwork, VaultId,
};
use warden_custody::{CustodyVault, LoggingTransfer, ValueTransfer};

use crate::sinks::RecordingEventSink;

/// Seed of the fixture's trusted authority key
pub const AUTHORITY_SEED: [u8; 32] = [7; 32];
/// Identity of the fixture vault
pub const VAULT_ID: VaultId = VaultId::from_bytes([0x11; 32]);
/// Network the fixture starts on
pub const NETWORK: NetworkId = NetworkId::new(1);

/// A vault wired to an in-memory authority, with recording event sink
pub struct WardenFixture {
    /// Signer holding the trusted authority key
    pub signer: PermissionSigner,
    /// The authority the vault delegates to
    pub authority: Arc<AuthorizationAuthority>,
    /// The vault under test
    pub vault: Arc<CustodyVault>,
    /// Events from both components
    pub events: Arc<RecordingEventSink>,
    /// Runtime network discriminator seen by the vault
    pub network: Arc<SwitchableNetwork>,
}

impl WardenFixture {
    /// Fixture whose transfers are only logged
    pub fn new() -> Self {
        Self::with_transfer(Arc::new(LoggingTransfer))
    }

    /// Fixture that pays out through `transfer`
    pub fn with_transfer(transfer: Arc<dyn ValueTransfer>) -> Self {
        let signer = PermissionSigner::from_seed(&AUTHORITY_SEED);
        let events = Arc::new(RecordingEventSink::default());
        let authority = Arc::new(AuthorizationAuthority::with_identity(
            signer.identity(),
            Arc::new(MemoryReplayLedger::new()),
            events.clone(),
        ));
        let network = Arc::new(SwitchableNetwork::new(NETWORK));
        let vault = Arc::new(CustodyVault::new(
            VAULT_ID,
            authority.clone(),
            network.clone(),
            transfer,
            events.clone(),
        ));

        Self {
            signer,
            authority,
            vault,
            events,
            network,
        }
    }

    /// Request this vault would build right now
    pub fn request(&self, recipient: AccountId, amount: Amount, nonce: u64) -> PermissionRequest {
        self.request_on(recipient, amount, nonce, self.network.current_network())
    }

    /// Request for an explicit network
    pub fn request_on(
        &self,
        recipient: AccountId,
        amount: Amount,
        nonce: u64,
        network: NetworkId,
    ) -> PermissionRequest {
        PermissionRequest::new(VAULT_ID, recipient, amount, nonce, network)
            .expect("fixture requests use non-zero amounts")
    }

    /// Authority signature for a withdrawal from this vault on the current network
    pub fn permit(&self, recipient: AccountId, amount: Amount, nonce: u64) -> PermissionSignature {
        self.signer.sign(&self.request(recipient, amount, nonce))
    }
}

impl Default for WardenFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic account from a one-byte label
pub fn account(label: u8) -> AccountId {
    AccountId::from_bytes([label; 32])
}
