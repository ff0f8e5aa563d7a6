//! Data model for runs and persisted artifacts
//!
//! Three artifacts survive a run, all JSON-shaped with camelCase fields:
//!
//! - known state (`{ "<domain>": { "ipAddress": "..." } }`): the last
//!   address each domain was successfully reconciled to
//! - update history (`{ "<timestamp>": [DomainResult, ...] }`): append-only
//!   audit trail of real updates
//! - run log: the full picture of the most recent run, rewritten every time
//!
//! [`Reconciliation`] is the in-memory outcome of one domain's
//! reconciliation; callers branch on its variants rather than on errors.

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Outcome of reconciling a single domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The local cache already matches the current address; the provider was
    /// never contacted.
    Skipped {
        /// The unchanged address
        address: IpAddr,
    },

    /// The remote record was already correct; only the local cache needed
    /// refreshing. No write was issued.
    SelfHealed {
        /// The address both sides now agree on
        address: IpAddr,
    },

    /// The remote record was rewritten to the current address.
    Updated {
        /// The address the record held before the update
        previous: IpAddr,
        /// The address the record holds now
        current: IpAddr,
    },

    /// Lookup or update failed. The known-state entry for this domain is
    /// left untouched so the next run retries automatically.
    Failed {
        /// Human-readable failure description
        reason: String,
    },
}

impl Reconciliation {
    /// Whether this outcome changed the remote record
    pub fn updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    /// Whether this outcome is a failure
    pub fn failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The message recorded for this outcome, if any
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Skipped { .. } => Some(
                "no update attempted: address unchanged since the last run".to_string(),
            ),
            Self::SelfHealed { .. } => Some(
                "remote record already current, local cache refreshed".to_string(),
            ),
            Self::Updated { .. } => None,
            Self::Failed { reason } => Some(reason.clone()),
        }
    }
}

/// Per-domain entry of the run log and update history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainResult {
    /// The reconciled domain
    pub domain: String,

    /// Address the remote record held before the run (absent on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_ip_address: Option<IpAddr>,

    /// Address the remote record holds after the run (absent on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_ip_address: Option<IpAddr>,

    /// Whether the remote record was actually rewritten
    pub updated: bool,

    /// Why nothing was written, when nothing was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DomainResult {
    /// Build the persisted form of a reconciliation outcome
    pub fn new(domain: impl Into<String>, reconciliation: &Reconciliation) -> Self {
        let (old_ip_address, new_ip_address) = match reconciliation {
            Reconciliation::Skipped { address } | Reconciliation::SelfHealed { address } => {
                (Some(*address), Some(*address))
            }
            Reconciliation::Updated { previous, current } => (Some(*previous), Some(*current)),
            Reconciliation::Failed { .. } => (None, None),
        };

        Self {
            domain: domain.into(),
            old_ip_address,
            new_ip_address,
            updated: reconciliation.updated(),
            message: reconciliation.message(),
        }
    }
}

/// Last address a domain was successfully reconciled to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownAddress {
    /// The cached address
    #[serde(rename = "ipAddress")]
    pub ip_address: IpAddr,
}

impl KnownAddress {
    pub fn new(ip_address: IpAddr) -> Self {
        Self { ip_address }
    }
}

/// Mapping from domain name to its last known address
pub type KnownState = HashMap<String, KnownAddress>;

/// Mapping from run timestamp to the updates that run performed.
/// Ordered so the serialized history reads chronologically.
pub type UpdateHistory = BTreeMap<String, Vec<DomainResult>>;

/// Full record of a single run, overwritten each time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLog {
    /// When the run started
    pub current_time: String,

    /// The resolved public address (absent when resolution itself failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_ip_address: Option<IpAddr>,

    /// One entry per configured domain, in configuration order
    #[serde(default)]
    pub domain_logs: Vec<DomainResult>,

    /// Top-level failure message, set only when the run aborted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RunLog {
    /// Start an empty log for a run beginning now
    pub fn new(current_time: impl Into<String>) -> Self {
        Self {
            current_time: current_time.into(),
            public_ip_address: None,
            domain_logs: Vec::new(),
            message: None,
        }
    }
}
