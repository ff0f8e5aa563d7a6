// # HTTP IP Source
//
// Resolves the caller's public address by querying plain-text IP echo
// services over HTTP.
//
// The engine asks for the address exactly once per run, so this source does
// a single pass over its endpoint list: the first endpoint that answers
// with a parseable address wins, later ones are only tried after a failure.
// When every endpoint fails the error is fatal to the run.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;

use dnsync_core::traits::IpSource;
use dnsync_core::{Error, Result};

/// Timeout for each individual echo request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default echo endpoints, tried in order
const DEFAULT_ENDPOINTS: &[&str] = &[
    "https://api.ipify.org",
    "https://ifconfig.me/ip",
    "https://icanhazip.com",
];

/// HTTP-based public address source with ordered failover
pub struct HttpIpSource {
    endpoints: Vec<String>,
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source over the default endpoint list
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a source over a custom endpoint list
    pub fn with_endpoints(endpoints: Vec<String>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::config("IP source needs at least one endpoint"));
        }

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { endpoints, client })
    }

    /// Query one endpoint and parse its plain-text answer
    async fn fetch(&self, url: &str) -> Result<IpAddr> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ip_resolve(format!("{}: request failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_resolve(format!(
                "{}: HTTP status {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_resolve(format!("{}: failed to read response: {}", url, e)))?;

        parse_address(&body)
            .ok_or_else(|| Error::ip_resolve(format!("{}: answer is not an IP address", url)))
    }
}

/// Parse an echo service answer, tolerating surrounding whitespace
fn parse_address(body: &str) -> Option<IpAddr> {
    body.trim().parse().ok()
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let mut last_error = None;

        for url in &self.endpoints {
            match self.fetch(url).await {
                Ok(ip) => {
                    tracing::debug!("public address {} via {}", ip, url);
                    return Ok(ip);
                }
                Err(e) => {
                    tracing::warn!("address lookup via {} failed: {}", url, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| Error::ip_resolve("no endpoints configured")))
    }
}
