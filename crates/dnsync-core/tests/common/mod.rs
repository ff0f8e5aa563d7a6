//! Test doubles and helpers for the engine integration tests
//!
//! The provider double is scripted per domain and counts its calls, so
//! tests can assert not just outcomes but which protocol steps ran.

use async_trait::async_trait;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dnsync_core::error::{Error, Result};
use dnsync_core::traits::{AddressRecord, DnsProvider, IpSource, StateStore};
use dnsync_core::{Config, MemoryStore};

pub fn addr(s: &str) -> IpAddr {
    s.parse().unwrap()
}

/// A config over the given domains with filler credentials
pub fn config(domains: &[&str]) -> Config {
    Config {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        api_base: "https://api.invalid/client/v4".to_string(),
        token: "test-token-0123456789".to_string(),
    }
}

/// Seed a store key with a JSON value
pub async fn seed(store: &MemoryStore, key: &str, value: serde_json::Value) {
    store.save(key, &value).await.unwrap();
}

/// An IP source that always answers with the same address
pub struct FixedIpSource {
    ip: IpAddr,
}

impl FixedIpSource {
    pub fn new(ip: IpAddr) -> Self {
        Self { ip }
    }
}

#[async_trait]
impl IpSource for FixedIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Ok(self.ip)
    }
}

/// An IP source that always fails, for the fatal path
pub struct FailingIpSource;

#[async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<IpAddr> {
        Err(Error::ip_resolve("no public address found"))
    }
}

/// What the scripted provider pretends the remote side looks like
#[derive(Debug, Clone)]
pub enum RemoteBehavior {
    /// The provider has no zone for the domain
    MissingZone,
    /// The zone exists but holds no address record
    MissingRecord,
    /// The record holds this content; updates succeed
    Record { content: IpAddr },
    /// The record holds this content; updates fail with this status
    RecordUpdateFails { content: IpAddr, status: u16 },
}

/// A provider double scripted per domain, with call counters
#[derive(Clone, Default)]
pub struct ScriptedProvider {
    behaviors: Arc<Mutex<HashMap<String, RemoteBehavior>>>,
    zone_lookups: Arc<AtomicUsize>,
    record_lookups: Arc<AtomicUsize>,
    updates: Arc<Mutex<Vec<(String, IpAddr)>>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the remote state for a domain
    pub fn script(&self, domain: &str, behavior: RemoteBehavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(domain.to_string(), behavior);
    }

    /// How many zone lookups were made (0 means the provider was never hit)
    pub fn zone_lookup_count(&self) -> usize {
        self.zone_lookups.load(Ordering::SeqCst)
    }

    pub fn record_lookup_count(&self) -> usize {
        self.record_lookups.load(Ordering::SeqCst)
    }

    /// The (domain, address) pairs that were actually written
    pub fn updates(&self) -> Vec<(String, IpAddr)> {
        self.updates.lock().unwrap().clone()
    }

    fn behavior_for(&self, domain: &str) -> Option<RemoteBehavior> {
        self.behaviors.lock().unwrap().get(domain).cloned()
    }
}

#[async_trait]
impl DnsProvider for ScriptedProvider {
    async fn find_zone(&self, domain: &str) -> Result<String> {
        self.zone_lookups.fetch_add(1, Ordering::SeqCst);

        match self.behavior_for(domain) {
            None | Some(RemoteBehavior::MissingZone) => Err(Error::zone_not_found(domain)),
            Some(_) => Ok(format!("zone-{}", domain)),
        }
    }

    async fn find_address_record(&self, zone_id: &str) -> Result<AddressRecord> {
        self.record_lookups.fetch_add(1, Ordering::SeqCst);

        let domain = zone_id.strip_prefix("zone-").unwrap_or(zone_id);
        match self.behavior_for(domain) {
            Some(RemoteBehavior::Record { content })
            | Some(RemoteBehavior::RecordUpdateFails { content, .. }) => Ok(AddressRecord {
                id: format!("record-{}", domain),
                content,
            }),
            _ => Err(Error::record_not_found(zone_id)),
        }
    }

    async fn update_record(&self, zone_id: &str, _record_id: &str, address: IpAddr) -> Result<()> {
        let domain = zone_id.strip_prefix("zone-").unwrap_or(zone_id).to_string();

        if let Some(RemoteBehavior::RecordUpdateFails { status, .. }) = self.behavior_for(&domain) {
            return Err(Error::provider(status, "record update failed"));
        }

        self.updates.lock().unwrap().push((domain, address));
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}
