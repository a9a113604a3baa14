//! Warden Testing Infrastructure
//!
//! Shared fixtures for exercising the authority and the vault together:
//! deterministic keys, a fully wired [`WardenFixture`], recording sinks, a
//! reentrant transfer, and proptest strategies for permission requests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod sinks;
pub mod strategies;

pub use fixtures::{account, WardenFixture, AUTHORITY_SEED, NETWORK, VAULT_ID};
pub use sinks::{RecordingEventSink, RecordingTransfer, ReentrantTransfer, ReentryObservation};

/// Install a test-friendly `tracing` subscriber honoring `RUST_LOG`
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
