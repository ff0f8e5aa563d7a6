//! Error types for dnsync
//!
//! One error enum covers the whole crate. Where an error stops is decided by
//! the engine: provider and lookup failures inside a single domain's
//! reconciliation are absorbed into that domain's outcome, everything else
//! crosses the run boundary and aborts the run.

use thiserror::Error;

/// Result type alias for dnsync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dnsync system
#[derive(Error, Debug)]
pub enum Error {
    /// The provider has no zone matching the domain
    #[error("no zone found for domain {0}")]
    ZoneNotFound(String),

    /// The zone exists but holds no address record
    #[error("no A record found in zone {0}")]
    RecordNotFound(String),

    /// The provider answered with a non-success status
    #[error("provider returned status {status}: {message}")]
    Provider {
        /// HTTP status code of the failed response
        status: u16,
        /// Short description of what was being attempted
        message: String,
    },

    /// HTTP transport errors (the request failed before any status was seen)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Public address resolution failed; this aborts the run
    #[error("public address lookup failed: {0}")]
    IpResolve(String),

    /// State store errors
    #[error("state store error: {0}")]
    StateStore(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a "zone not found" error for a domain
    pub fn zone_not_found(domain: impl Into<String>) -> Self {
        Self::ZoneNotFound(domain.into())
    }

    /// Create a "record not found" error for a zone
    pub fn record_not_found(zone: impl Into<String>) -> Self {
        Self::RecordNotFound(zone.into())
    }

    /// Create a provider error from a response status
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self::Provider {
            status,
            message: message.into(),
        }
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a public address resolution error
    pub fn ip_resolve(msg: impl Into<String>) -> Self {
        Self::IpResolve(msg.into())
    }

    /// Create a state store error
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
