// # Cloudflare DNS Provider
//
// Cloudflare API v4 client implementing the `DnsProvider` contract for
// dnsync.
//
// ## Wire Protocol
//
// - List zones: GET `{apiBase}/zones?name={domain}`
// - List A records: GET `{apiBase}/zones/{zoneId}/dns_records?type=A`
// - Update record: PATCH `{apiBase}/zones/{zoneId}/dns_records/{recordId}`
//   with body `{"content": "<ip>"}`
//
// All requests carry bearer-token authentication and a bounded timeout.
// This client is a thin wrapper over the wire protocol: no retries, no
// caching, no update decisions. The engine owns all of that and absorbs any
// error returned here at its per-domain boundary.
//
// ## Security Requirements
//
// - The API token never appears in logs or Debug output.
// - The client fails fast on an empty token.
//
// API reference: https://developers.cloudflare.com/api/

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::net::IpAddr;
use std::time::Duration;

use dnsync_core::traits::{AddressRecord, DnsProvider};
use dnsync_core::{Error, Result};

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Cloudflare DNS provider client
pub struct CloudflareProvider {
    /// Base URL of the API, no trailing slash
    api_base: String,

    /// API token, never logged
    token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_base", &self.api_base)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

/// Response envelope of the zone listing endpoint
#[derive(Debug, Deserialize)]
struct ZoneList {
    #[serde(default)]
    result: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
struct Zone {
    id: String,
}

/// Response envelope of the record listing endpoint
#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(default)]
    result: Vec<Record>,
}

#[derive(Debug, Deserialize)]
struct Record {
    id: String,
    content: String,
}

impl CloudflareProvider {
    /// Create a new client
    ///
    /// `api_base` is the API root (e.g. `https://api.cloudflare.com/client/v4`);
    /// a trailing slash is tolerated and stripped. The token must carry
    /// Zone:DNS:Edit permissions.
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::config("Cloudflare API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    /// GET a JSON endpoint, mapping non-success statuses to provider errors
    async fn get_json<T: DeserializeOwned>(&self, url: &str, context: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| Error::http(format!("{} request failed: {}", context, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::provider(status.as_u16(), format!("{} failed", context)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::http(format!("failed to parse {} response: {}", context, e)))
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn find_zone(&self, domain: &str) -> Result<String> {
        tracing::debug!("looking up zone for {}", domain);

        let url = format!("{}/zones?name={}", self.api_base, domain);
        let zones: ZoneList = self.get_json(&url, "zone lookup").await?;

        let zone = zones
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::zone_not_found(domain))?;

        tracing::debug!("found zone {} for {}", zone.id, domain);
        Ok(zone.id)
    }

    async fn find_address_record(&self, zone_id: &str) -> Result<AddressRecord> {
        tracing::debug!("looking up A record in zone {}", zone_id);

        let url = format!("{}/zones/{}/dns_records?type=A", self.api_base, zone_id);
        let records: RecordList = self.get_json(&url, "record lookup").await?;

        let record = records
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::record_not_found(zone_id))?;

        let content: IpAddr = record.content.parse().map_err(|_| {
            Error::http(format!(
                "record content is not an IP address: {}",
                record.content
            ))
        })?;

        Ok(AddressRecord {
            id: record.id,
            content,
        })
    }

    async fn update_record(&self, zone_id: &str, record_id: &str, address: IpAddr) -> Result<()> {
        let url = format!(
            "{}/zones/{}/dns_records/{}",
            self.api_base, zone_id, record_id
        );

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "content": address.to_string() }))
            .send()
            .await
            .map_err(|e| Error::http(format!("record update request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::provider(status.as_u16(), "record update failed"));
        }

        tracing::info!("record {} in zone {} set to {}", record_id, zone_id, address);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "cloudflare"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_token() {
        assert!(CloudflareProvider::new("https://api.test", "").is_err());
    }

    #[test]
    fn strips_trailing_slash_from_api_base() {
        let provider = CloudflareProvider::new("https://api.test/", "token").unwrap();
        assert_eq!(provider.api_base, "https://api.test");
    }

    #[test]
    fn token_not_exposed_in_debug() {
        let provider = CloudflareProvider::new("https://api.test", "secret_token_12345").unwrap();

        let debug = format!("{:?}", provider);
        assert!(!debug.contains("secret_token_12345"));
        assert!(debug.contains("CloudflareProvider"));
    }

    #[test]
    fn parses_zone_listing() {
        let zones: ZoneList =
            serde_json::from_str(r#"{"result":[{"id":"zone-1","name":"a.example"}]}"#).unwrap();
        assert_eq!(zones.result.len(), 1);
        assert_eq!(zones.result[0].id, "zone-1");

        let empty: ZoneList = serde_json::from_str(r#"{"result":[]}"#).unwrap();
        assert!(empty.result.is_empty());
    }

    #[test]
    fn parses_record_listing() {
        let records: RecordList = serde_json::from_str(
            r#"{"result":[{"id":"rec-1","content":"1.2.3.4","type":"A"}]}"#,
        )
        .unwrap();
        assert_eq!(records.result[0].id, "rec-1");
        assert_eq!(records.result[0].content, "1.2.3.4");
    }
}
