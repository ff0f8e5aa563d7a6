// # IP Source Trait
//
// Defines the interface for resolving the caller's current public address.
//
// The engine performs exactly one lookup per run; a failure here is fatal
// and aborts the run before any domain is touched.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error::Result;

/// Trait for public address sources
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: the externally visible address
    /// - `Err(Error::IpResolve)`: the address could not be determined
    async fn current(&self) -> Result<IpAddr>;
}
