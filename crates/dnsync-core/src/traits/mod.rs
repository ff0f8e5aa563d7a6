//! External collaborator contracts
//!
//! The engine talks to the outside world through three traits:
//!
//! - [`DnsProvider`]: zone/record lookup and record updates at the remote
//!   DNS provider
//! - [`IpSource`]: the current public address, one lookup per run
//! - [`StateStore`]: opaque key-value persistence for the run artifacts

pub mod dns_provider;
pub mod ip_source;
pub mod state_store;

pub use dns_provider::{AddressRecord, DnsProvider};
pub use ip_source::IpSource;
pub use state_store::StateStore;
