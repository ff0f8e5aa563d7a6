// # dnsync-core
//
// Core library for the dnsync address updater.
//
// ## Architecture Overview
//
// One invocation is one run: resolve the public address, reconcile every
// configured domain against the provider's record store, persist the
// resulting state and audit trail, exit.
//
// - **DnsProvider**: trait wrapping the provider's zone/record protocol
// - **IpSource**: trait for the single public-address lookup per run
// - **StateStore**: trait for the persisted key-value artifacts
// - **Reconciler**: per-domain decision and action, with failure isolation
// - **Runner**: the run context that drives everything and owns persistence
//
// Scheduling is external: the binary is expected to be invoked periodically
// (cron, a systemd timer), not to stay resident.

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::Config;
pub use engine::{KNOWN_STATE_KEY, RUN_LOG_KEY, Reconciler, Runner, UPDATE_HISTORY_KEY};
pub use error::{Error, Result};
pub use model::{DomainResult, KnownAddress, KnownState, Reconciliation, RunLog, UpdateHistory};
pub use store::{FileStore, MemoryStore};
pub use traits::{AddressRecord, DnsProvider, IpSource, StateStore};
