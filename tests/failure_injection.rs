//! Failure injection tests for the resilient loader.
//!
//! Timing-sensitive scenarios run under Tokio's paused clock so the
//! retry spacing and never-settles properties are asserted
//! deterministically.

use std::sync::Arc;
use std::time::Duration;

use chunkguard::config::RetryConfig;
use chunkguard::marker::{MarkerStore, MemoryMarkerStore};
use chunkguard::restart::CountingRestart;
use chunkguard::ResilientLoader;

mod common;
use common::{Outcome, ScriptedFactory};

struct Harness {
    store: Arc<MemoryMarkerStore>,
    restart: Arc<CountingRestart>,
    loader: ResilientLoader,
}

fn harness(max_attempts: u32, interval_ms: u64) -> Harness {
    let store = Arc::new(MemoryMarkerStore::new());
    let restart = Arc::new(CountingRestart::new());
    let loader = ResilientLoader::new("dashboard", store.clone(), restart.clone()).with_retry(
        RetryConfig {
            max_attempts,
            interval_ms,
            ..RetryConfig::default()
        },
    );
    Harness {
        store,
        restart,
        loader,
    }
}

#[tokio::test]
async fn test_success_passes_through_and_resets_marker() {
    let h = harness(3, 1000);
    let factory = ScriptedFactory::new([Outcome::Ok("module body")]);

    let value = h.loader.load(factory.factory()).await.unwrap();

    assert_eq!(value, "module body");
    assert_eq!(factory.calls(), 1, "a succeeding factory is called once");
    assert_eq!(h.restart.count(), 0);
    // The only marker touch on success is the reset to false
    assert_eq!(
        h.store.get(h.loader.marker().key()).as_deref(),
        Some("false")
    );
}

#[tokio::test(start_paused = true)]
async fn test_first_failure_arms_marker_and_restarts_once() {
    let h = harness(3, 1000);
    let factory = ScriptedFactory::new([Outcome::Err("chunk 404")]);

    // The restart branch must never settle; bound the wait so the test
    // can observe that.
    let result = tokio::time::timeout(Duration::from_secs(2), h.loader.load(factory.factory()))
        .await;

    assert!(result.is_err(), "no settlement within 2 seconds");
    assert_eq!(h.restart.count(), 1, "exactly one restart per episode");
    assert!(h.loader.marker().read(), "marker armed before the restart");
    assert_eq!(factory.calls(), 1, "no retries in the restart branch");
}

#[tokio::test(start_paused = true)]
async fn test_armed_retry_succeeds_on_third_call() {
    let h = harness(3, 100);
    h.loader.marker().arm();
    let factory = ScriptedFactory::new([
        Outcome::Err("fail 1"),
        Outcome::Err("fail 2"),
        Outcome::Ok("third time"),
    ]);

    let start = tokio::time::Instant::now();
    let value = h.loader.load(factory.factory()).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(value, "third time");
    assert_eq!(factory.calls(), 3);
    assert!(
        elapsed >= Duration::from_millis(200) && elapsed < Duration::from_millis(300),
        "two fixed 100ms delays expected, got {elapsed:?}"
    );
    assert_eq!(h.restart.count(), 0, "no restart once the marker is armed");
    assert!(!h.loader.marker().read(), "success resets the marker");
}

#[tokio::test(start_paused = true)]
async fn test_armed_retry_stops_at_first_success() {
    let h = harness(5, 100);
    h.loader.marker().arm();
    let factory = ScriptedFactory::new([Outcome::Err("fail 1"), Outcome::Ok("recovered")]);

    let start = tokio::time::Instant::now();
    let value = h.loader.load(factory.factory()).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(value, "recovered");
    assert_eq!(factory.calls(), 2, "remaining attempts are not consumed");
    assert!(
        elapsed >= Duration::from_millis(100) && elapsed < Duration::from_millis(200),
        "one delay expected, got {elapsed:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_propagates_first_error() {
    let h = harness(2, 50);
    h.loader.marker().arm();
    let factory = ScriptedFactory::new([Outcome::Err("E1"), Outcome::Err("E2")]);

    let start = tokio::time::Instant::now();
    let err = h.loader.load(factory.factory()).await.unwrap_err();
    let elapsed = start.elapsed();

    assert_eq!(err.attempts(), 2);
    let message = err.to_string();
    assert!(message.contains("E1"), "first error surfaces: {message}");
    assert!(!message.contains("E2"), "last error is not surfaced: {message}");
    assert_eq!(factory.calls(), 2);
    assert!(
        elapsed >= Duration::from_millis(50) && elapsed < Duration::from_millis(150),
        "one 50ms delay expected, got {elapsed:?}"
    );
    assert!(h.loader.marker().read(), "marker stays armed on exhaustion");
    assert_eq!(h.restart.count(), 0);
}

#[tokio::test]
async fn test_repeated_success_is_idempotent() {
    let h = harness(3, 1000);
    let factory = ScriptedFactory::new([Outcome::Ok("body")]);

    for _ in 0..3 {
        h.loader.load(factory.factory()).await.unwrap();
        assert!(!h.loader.marker().read());
    }
    assert_eq!(h.restart.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_episodes_for_distinct_modules_are_independent() {
    let store = Arc::new(MemoryMarkerStore::new());
    let restart = Arc::new(CountingRestart::new());

    let dashboard = ResilientLoader::new("dashboard", store.clone(), restart.clone())
        .with_marker_key("dashboard.reloaded");
    let finance = ResilientLoader::new("finance", store.clone(), restart.clone())
        .with_marker_key("finance.reloaded");

    // Dashboard enters its restart branch...
    let failing = ScriptedFactory::new([Outcome::Err("stale chunk")]);
    let pending = tokio::time::timeout(
        Duration::from_millis(500),
        dashboard.load(failing.factory()),
    );
    assert!(pending.await.is_err());
    assert!(dashboard.marker().read());

    // ...and finance still starts its own episode fresh.
    let succeeding = ScriptedFactory::new([Outcome::Ok("finance body")]);
    let value = finance.load(succeeding.factory()).await.unwrap();
    assert_eq!(value, "finance body");
    assert!(!finance.marker().read());
    assert_eq!(restart.count(), 1, "only dashboard's episode restarted");
}
