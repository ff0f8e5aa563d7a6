//! Reconciliation engine
//!
//! Two pieces live here:
//!
//! - [`Reconciler`]: decides and executes the minimal action for one domain.
//!   It is the per-domain error boundary: whatever goes wrong while talking
//!   to the provider becomes a [`Reconciliation::Failed`] outcome and never
//!   touches sibling domains.
//! - [`Runner`]: the per-invocation run context. It resolves the public
//!   address, drives every configured domain through the reconciler,
//!   aggregates the outcomes and persists the three artifacts.
//!
//! ## Run Flow
//!
//! 1. Resolve the public address (fatal on failure)
//! 2. Load the known state
//! 3. Reconcile each domain in configuration order
//! 4. Persist: new known state, update history (only when something
//!    changed), run log (always, overwriting)
//!
//! A domain that fails individually does not fail the run. The only fatal
//! path is an error outside the per-domain boundary; it short-circuits the
//! run and leaves every artifact except the run log at its pre-run value.

use chrono::Local;
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::model::{DomainResult, KnownAddress, KnownState, Reconciliation, RunLog, UpdateHistory};
use crate::traits::{DnsProvider, IpSource, StateStore};

/// Store key of the known-state cache
pub const KNOWN_STATE_KEY: &str = "internal";

/// Store key of the append-only update history
pub const UPDATE_HISTORY_KEY: &str = "updates";

/// Store key of the last-run log
pub const RUN_LOG_KEY: &str = "last-run";

/// Timestamp format used for run logs and history keys
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Decides and executes the minimal action for a single domain
pub struct Reconciler {
    provider: Box<dyn DnsProvider>,
}

impl Reconciler {
    /// Create a reconciler backed by a provider client
    pub fn new(provider: Box<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Reconcile one domain against the current public address
    ///
    /// Decision policy, in order:
    ///
    /// 1. Prior address known and equal to the current one → `Skipped`,
    ///    without contacting the provider.
    /// 2. Remote record already holds the current address → `SelfHealed`,
    ///    without issuing a write.
    /// 3. Otherwise rewrite the record → `Updated`.
    ///
    /// Every provider failure is absorbed here and reported as `Failed`;
    /// this method never returns an error.
    pub async fn reconcile(
        &self,
        domain: &str,
        current: IpAddr,
        prior: Option<IpAddr>,
    ) -> Reconciliation {
        if prior == Some(current) {
            debug!("{}: address unchanged since last run, skipping", domain);
            return Reconciliation::Skipped { address: current };
        }

        match self.reconcile_remote(domain, current).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("{}: reconciliation failed: {}", domain, e);
                Reconciliation::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Two-step lookup, then an update only when the record content differs
    async fn reconcile_remote(&self, domain: &str, current: IpAddr) -> Result<Reconciliation> {
        let zone_id = self.provider.find_zone(domain).await?;
        let record = self.provider.find_address_record(&zone_id).await?;

        if record.content == current {
            debug!("{}: remote record already holds {}", domain, current);
            return Ok(Reconciliation::SelfHealed { address: current });
        }

        self.provider
            .update_record(&zone_id, &record.id, current)
            .await?;

        info!("{}: updated {} -> {}", domain, record.content, current);
        Ok(Reconciliation::Updated {
            previous: record.content,
            current,
        })
    }
}

/// Per-invocation run context
///
/// Constructed once per run and dropped afterwards; nothing here outlives a
/// single invocation.
pub struct Runner {
    ip_source: Box<dyn IpSource>,
    reconciler: Reconciler,
    store: Box<dyn StateStore>,
    config: Config,
}

impl Runner {
    /// Assemble a runner from its collaborators
    ///
    /// Validates the configuration up front so a malformed config never
    /// reaches the provider.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        store: Box<dyn StateStore>,
        config: Config,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            reconciler: Reconciler::new(provider),
            store,
            config,
        })
    }

    /// Execute one full run
    ///
    /// Returns the run log on normal completion, which includes runs where
    /// individual domains failed. A fatal error (address resolution, state
    /// store) is returned to the caller after the run log has been written
    /// with the failure message; known state and history are then left at
    /// their pre-run values.
    pub async fn run(&self) -> Result<RunLog> {
        let mut log = RunLog::new(Local::now().format(TIMESTAMP_FORMAT).to_string());
        info!("run started at {}", log.current_time);

        match self.try_run(&mut log).await {
            Ok(()) => {
                self.write_log(&log).await?;
                Ok(log)
            }
            Err(err) => {
                log.message = Some(err.to_string());
                if let Err(log_err) = self.write_log(&log).await {
                    error!("failed to write run log after fatal error: {}", log_err);
                }
                Err(err)
            }
        }
    }

    /// Everything inside the fatal boundary except the run log write
    async fn try_run(&self, log: &mut RunLog) -> Result<()> {
        let current = self.ip_source.current().await?;
        log.public_ip_address = Some(current);
        info!("current public address: {}", current);

        let known: KnownState = serde_json::from_value(self.store.load(KNOWN_STATE_KEY).await?)?;

        let mut next_known = KnownState::new();
        let mut updates = Vec::new();

        for domain in &self.config.domains {
            let prior = known.get(domain).map(|entry| entry.ip_address);
            let reconciliation = self.reconciler.reconcile(domain, current, prior).await;

            if reconciliation.failed() {
                // Carry the stale entry forward so the next run retries.
                if let Some(entry) = known.get(domain) {
                    next_known.insert(domain.clone(), *entry);
                }
            } else {
                next_known.insert(domain.clone(), KnownAddress::new(current));
            }

            let result = DomainResult::new(domain.as_str(), &reconciliation);
            if result.updated {
                updates.push(result.clone());
            }
            log.domain_logs.push(result);
        }

        self.store
            .save(KNOWN_STATE_KEY, &serde_json::to_value(&next_known)?)
            .await?;

        if !updates.is_empty() {
            let mut history: UpdateHistory =
                serde_json::from_value(self.store.load(UPDATE_HISTORY_KEY).await?)?;
            history.insert(log.current_time.clone(), updates);
            self.store
                .save(UPDATE_HISTORY_KEY, &serde_json::to_value(&history)?)
                .await?;
        }

        Ok(())
    }

    async fn write_log(&self, log: &RunLog) -> Result<()> {
        self.store
            .save(RUN_LOG_KEY, &serde_json::to_value(log)?)
            .await
    }
}
