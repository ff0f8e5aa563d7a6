//! Run configuration
//!
//! The configuration is a read-only input owned by the caller: the domains
//! to keep in sync (in processing order), the provider API base URL and the
//! bearer token. It is deserialized from a camelCase JSON document:
//!
//! ```json
//! {
//!   "domains": ["example.com", "www.example.com"],
//!   "apiBase": "https://api.cloudflare.com/client/v4",
//!   "token": "..."
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Immutable input for a single run
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Domains whose address record is kept in sync, in processing order
    pub domains: Vec<String>,

    /// Base URL of the provider API (no trailing slash)
    pub api_base: String,

    /// Bearer token for the provider API
    pub token: String,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("domains", &self.domains)
            .field("api_base", &self.api_base)
            .field("token", &"<REDACTED>")
            .finish()
    }
}

impl Config {
    /// Parse a configuration from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(Error::config("no domains configured"));
        }

        for domain in &self.domains {
            validate_domain_name(domain)?;
        }

        if self.token.is_empty() {
            return Err(Error::config("provider token cannot be empty"));
        }

        // Catch the usual copy-paste placeholders before they hit the API
        let token_lower = self.token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower == "token"
        {
            return Err(Error::config(
                "provider token appears to be a placeholder, use a real API token",
            ));
        }

        if !self.api_base.starts_with("https://") && !self.api_base.starts_with("http://") {
            return Err(Error::config(format!(
                "apiBase must be an http(s) URL, got: {}",
                self.api_base
            )));
        }

        Ok(())
    }
}

/// Validate that a string is a valid domain name
///
/// Basic shape validation per RFC 1035: label lengths, total length and the
/// allowed character set. Not comprehensive, but catches common mistakes.
fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        return Err(Error::config("domain name cannot be empty"));
    }

    if domain.len() > 253 {
        return Err(Error::config(format!(
            "domain name too long: {} chars (max 253)",
            domain.len()
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(Error::config(format!(
                "domain name has an empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(Error::config(format!(
                "domain label too long: '{}' ({} chars, max 63)",
                label,
                label.len()
            )));
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            return Err(Error::config(format!(
                "domain label contains invalid characters: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::config(format!(
                "domain label cannot start or end with a hyphen: '{}'",
                label
            )));
        }
    }

    Ok(())
}
