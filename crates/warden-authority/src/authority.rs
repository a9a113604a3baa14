//! Authorization authority
//!
//! The authority is the only component that interprets permission
//! signatures. `authorize` runs verify, then test-and-set on the replay
//! ledger, then notification, in that order. Because the ledger flip is
//! committed before `authorize` returns, a caller that performs an external
//! transfer afterwards can be re-entered safely: any nested `authorize` for
//! the same request observes the digest as consumed.

use once_cell::sync::OnceCell;
use std::sync::Arc;
use warden_core::{
    AuthError, AuthoritySettings, Authorizer, EventSink, PermissionDigest, PermissionRequest,
    PermissionSignature, TracingEventSink, VaultEvent,
};

use crate::encoding::canonical_digest;
use crate::errors::AuthorityError;
use crate::identity::AuthorityIdentity;
use crate::ledger::{FileReplayLedger, MemoryReplayLedger, ReplayLedger};

/// Verifies permissions and enforces exactly-once consumption
pub struct AuthorizationAuthority {
    /// Registered signer; written at most once
    identity: OnceCell<AuthorityIdentity>,
    /// Consumed-digest store
    ledger: Arc<dyn ReplayLedger>,
    /// Observability sink
    events: Arc<dyn EventSink>,
}

impl AuthorizationAuthority {
    /// Create an authority with no registered identity
    ///
    /// Every `authorize` call fails with [`AuthError::NotInitialized`] until
    /// [`initialize`](Self::initialize) succeeds.
    pub fn new(ledger: Arc<dyn ReplayLedger>, events: Arc<dyn EventSink>) -> Self {
        Self {
            identity: OnceCell::new(),
            ledger,
            events,
        }
    }

    /// Create an authority with its identity registered atomically
    pub fn with_identity(
        identity: AuthorityIdentity,
        ledger: Arc<dyn ReplayLedger>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        tracing::info!(%identity, "authorization authority created");
        Self {
            identity: OnceCell::with_value(identity),
            ledger,
            events,
        }
    }

    /// In-memory authority that logs events through `tracing`
    pub fn in_memory(identity: AuthorityIdentity) -> Self {
        Self::with_identity(
            identity,
            Arc::new(MemoryReplayLedger::new()),
            Arc::new(TracingEventSink),
        )
    }

    /// Build an authority from configuration
    ///
    /// Opens a [`FileReplayLedger`] when `ledger_path` is set, otherwise an
    /// in-memory ledger. The identity is registered when `verifying_key` is
    /// set and left for [`initialize`](Self::initialize) otherwise.
    pub fn from_settings(
        settings: &AuthoritySettings,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, AuthorityError> {
        let ledger: Arc<dyn ReplayLedger> = match &settings.ledger_path {
            Some(path) => Arc::new(FileReplayLedger::open(path)?),
            None => Arc::new(MemoryReplayLedger::new()),
        };

        let authority = Self::new(ledger, events);
        if let Some(bytes) = settings.verifying_key_bytes()? {
            authority.initialize(AuthorityIdentity::from_bytes(&bytes)?)?;
        }
        Ok(authority)
    }

    /// Register the authority identity
    ///
    /// Succeeds exactly once; later calls fail with
    /// [`AuthError::AlreadyInitialized`] and leave the first identity in place.
    pub fn initialize(&self, identity: AuthorityIdentity) -> Result<(), AuthError> {
        self.identity.set(identity).map_err(|_| {
            tracing::warn!("rejected second authority identity registration");
            AuthError::AlreadyInitialized
        })?;
        tracing::info!(%identity, "authority identity registered");
        Ok(())
    }

    /// Registered identity, if any
    pub fn identity(&self) -> Option<&AuthorityIdentity> {
        self.identity.get()
    }

    /// Whether `digest` has been consumed
    pub fn is_consumed(&self, digest: &PermissionDigest) -> Result<bool, AuthError> {
        Ok(self.ledger.is_consumed(digest)?)
    }

    /// Number of permissions consumed so far
    pub fn consumed_count(&self) -> usize {
        self.ledger.consumed_count()
    }
}

impl Authorizer for AuthorizationAuthority {
    fn authorize(
        &self,
        request: &PermissionRequest,
        signature: &PermissionSignature,
    ) -> Result<(), AuthError> {
        let identity = self.identity.get().ok_or(AuthError::NotInitialized)?;

        let digest = canonical_digest(request);
        tracing::debug!(%digest, nonce = request.nonce(), "permission digest computed");

        if let Err(err) = identity.verify(&digest, signature) {
            tracing::warn!(%digest, "permission signature rejected");
            return Err(err);
        }

        if !self.ledger.try_consume(&digest)? {
            tracing::warn!(%digest, "permission replay rejected");
            return Err(AuthError::ReplayDetected);
        }

        tracing::info!(
            %digest,
            recipient = %request.recipient(),
            amount = request.amount(),
            "permission consumed"
        );
        self.events.emit(VaultEvent::AuthorizationConsumed {
            digest,
            recipient: request.recipient(),
        });
        Ok(())
    }
}

impl std::fmt::Debug for AuthorizationAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationAuthority")
            .field("identity", &self.identity.get())
            .field("consumed", &self.ledger.consumed_count())
            .finish()
    }
}
