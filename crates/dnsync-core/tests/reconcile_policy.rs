//! Reconciler decision policy
//!
//! Verifies the per-domain decision order: local skip before any provider
//! contact, self-heal before any write, update only when the remote record
//! actually differs, and failure absorption at the reconciler boundary.

mod common;

use common::*;
use dnsync_core::{Reconciler, Reconciliation};

#[tokio::test]
async fn unchanged_address_never_contacts_the_provider() {
    let provider = ScriptedProvider::new();
    let reconciler = Reconciler::new(Box::new(provider.clone()));

    let current = addr("2.2.2.2");
    let outcome = reconciler
        .reconcile("a.example", current, Some(current))
        .await;

    assert_eq!(outcome, Reconciliation::Skipped { address: current });
    assert_eq!(provider.zone_lookup_count(), 0);
    assert_eq!(provider.record_lookup_count(), 0);
    assert!(provider.updates().is_empty());
}

#[tokio::test]
async fn matching_remote_record_self_heals_without_a_write() {
    let provider = ScriptedProvider::new();
    let current = addr("2.2.2.2");
    provider.script("b.example", RemoteBehavior::Record { content: current });

    let reconciler = Reconciler::new(Box::new(provider.clone()));

    // No prior entry: the cache is cold but the remote side is already right.
    let outcome = reconciler.reconcile("b.example", current, None).await;

    assert_eq!(outcome, Reconciliation::SelfHealed { address: current });
    assert_eq!(provider.record_lookup_count(), 1);
    assert!(provider.updates().is_empty(), "no write may be issued");
}

#[tokio::test]
async fn stale_cache_with_correct_remote_also_self_heals() {
    let provider = ScriptedProvider::new();
    let current = addr("2.2.2.2");
    provider.script("b.example", RemoteBehavior::Record { content: current });

    let reconciler = Reconciler::new(Box::new(provider.clone()));

    let outcome = reconciler
        .reconcile("b.example", current, Some(addr("9.9.9.9")))
        .await;

    assert_eq!(outcome, Reconciliation::SelfHealed { address: current });
    assert!(provider.updates().is_empty());
}

#[tokio::test]
async fn differing_remote_record_is_updated() {
    let provider = ScriptedProvider::new();
    let previous = addr("1.1.1.1");
    let current = addr("2.2.2.2");
    provider.script("a.example", RemoteBehavior::Record { content: previous });

    let reconciler = Reconciler::new(Box::new(provider.clone()));

    let outcome = reconciler
        .reconcile("a.example", current, Some(previous))
        .await;

    assert_eq!(outcome, Reconciliation::Updated { previous, current });
    assert_eq!(
        provider.updates(),
        vec![("a.example".to_string(), current)]
    );
}

#[tokio::test]
async fn provider_failures_become_failed_outcomes() {
    let current = addr("2.2.2.2");

    let cases = [
        ("nozone.example", RemoteBehavior::MissingZone),
        ("norecord.example", RemoteBehavior::MissingRecord),
        (
            "rejected.example",
            RemoteBehavior::RecordUpdateFails {
                content: addr("1.1.1.1"),
                status: 500,
            },
        ),
    ];

    for (domain, behavior) in cases {
        let provider = ScriptedProvider::new();
        provider.script(domain, behavior);
        let reconciler = Reconciler::new(Box::new(provider.clone()));

        let outcome = reconciler.reconcile(domain, current, None).await;

        match outcome {
            Reconciliation::Failed { reason } => {
                assert!(!reason.is_empty(), "{}: reason must be descriptive", domain)
            }
            other => panic!("{}: expected Failed, got {:?}", domain, other),
        }
        assert!(provider.updates().is_empty());
    }
}

#[tokio::test]
async fn skipped_and_self_healed_results_stay_distinguishable() {
    let current = addr("2.2.2.2");

    let skipped = Reconciliation::Skipped { address: current };
    let healed = Reconciliation::SelfHealed { address: current };

    // Both are non-updates over the same address, but they must not collapse
    // into one another.
    assert_ne!(skipped, healed);
    assert_ne!(skipped.message(), healed.message());
}
