//! Capability traits at the vault/authority seam
//!
//! The custody vault is written against these traits only. It never sees a
//! key, a hash function or a ledger; it hands a fully-specified request to an
//! [`Authorizer`] and acts on the verdict.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::AuthError;
use crate::permission::{PermissionRequest, PermissionSignature};
use crate::types::NetworkId;

/// Sole arbiter of whether a requested transfer may proceed
///
/// A successful return means the permission has been verified and
/// irrevocably consumed. Implementations must commit the consumption before
/// returning, so that any call observed after (or nested inside) the
/// caller's follow-up work sees it.
pub trait Authorizer: Send + Sync {
    /// Verify and consume a permission
    fn authorize(
        &self,
        request: &PermissionRequest,
        signature: &PermissionSignature,
    ) -> Result<(), AuthError>;
}

impl<T: Authorizer + ?Sized> Authorizer for Arc<T> {
    fn authorize(
        &self,
        request: &PermissionRequest,
        signature: &PermissionSignature,
    ) -> Result<(), AuthError> {
        (**self).authorize(request, signature)
    }
}

/// Source of the runtime's current network discriminator
pub trait NetworkEnvironment: Send + Sync {
    /// Network in effect right now
    fn current_network(&self) -> NetworkId;
}

impl NetworkEnvironment for NetworkId {
    fn current_network(&self) -> NetworkId {
        *self
    }
}

/// Network discriminator that can change at runtime (e.g. after a fork)
#[derive(Debug, Default)]
pub struct SwitchableNetwork(AtomicU64);

impl SwitchableNetwork {
    /// Start on the given network
    pub fn new(network: NetworkId) -> Self {
        Self(AtomicU64::new(network.value()))
    }

    /// Move to a different network
    pub fn switch_to(&self, network: NetworkId) {
        tracing::info!(%network, "network discriminator switched");
        self.0.store(network.value(), Ordering::SeqCst);
    }
}

impl NetworkEnvironment for SwitchableNetwork {
    fn current_network(&self) -> NetworkId {
        NetworkId::new(self.0.load(Ordering::SeqCst))
    }
}
