// # DNS Provider Trait
//
// Defines the interface the reconciler uses to read and update address
// records at the remote DNS provider.
//
// ## Implementations
//
// - Cloudflare: `dnsync-provider-cloudflare` crate
//
// ## Contract
//
// Lookups are a two-step affair: first the zone for a domain, then the
// address record inside that zone. The reconciler compares the record's
// content against the current address and only calls `update_record` when
// they differ, so implementations never need their own idempotence checks.
// Implementations must bound every request with a timeout; a request that
// never completes would otherwise hang the whole run.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error::Result;

/// An address record as stored at the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// Provider-specific record identifier
    pub id: String,
    /// The address the record currently resolves to
    pub content: IpAddr,
}

/// Trait for DNS provider clients
///
/// Implementations wrap the provider's wire protocol and nothing more: no
/// retries, no caching, no decisions about whether an update is needed. All
/// of that is owned by the engine. Errors are returned to the caller, which
/// absorbs them at the per-domain boundary.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Find the zone holding records for a domain
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the provider's zone identifier
    /// - `Err(Error::ZoneNotFound)`: the provider has no matching zone
    /// - `Err(_)`: the lookup itself failed
    async fn find_zone(&self, domain: &str) -> Result<String>;

    /// Find the address record inside a zone
    ///
    /// # Returns
    ///
    /// - `Ok(AddressRecord)`: the record's id and current content
    /// - `Err(Error::RecordNotFound)`: the zone holds no address record
    /// - `Err(_)`: the lookup itself failed
    async fn find_address_record(&self, zone_id: &str) -> Result<AddressRecord>;

    /// Rewrite a record's content to a new address
    ///
    /// # Returns
    ///
    /// - `Ok(())`: the provider accepted the update
    /// - `Err(Error::Provider)`: the provider answered with a non-success
    ///   status
    async fn update_record(&self, zone_id: &str, record_id: &str, address: IpAddr) -> Result<()>;

    /// Provider name for logging
    fn provider_name(&self) -> &'static str;
}
