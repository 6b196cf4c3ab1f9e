//! Metrics emission.
//!
//! # Metrics
//! - `chunkguard_loads_total` (counter): load outcomes by module, outcome
//! - `chunkguard_retries_total` (counter): retry attempts by module
//! - `chunkguard_reloads_total` (counter): restart-tier activations by module
//! - `chunkguard_exhausted_total` (counter): retry exhaustions by module
//! - `chunkguard_fetch_total` (counter): chunk fetch outcomes by outcome
//!
//! All helpers are cheap counter increments against the `metrics` facade;
//! the embedding application installs the recorder/exporter it wants.

use metrics::counter;

/// Record a completed load (success or surfaced failure).
pub fn record_load(module: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "chunkguard_loads_total",
        "module" => module.to_string(),
        "outcome" => outcome,
    )
    .increment(1);
}

/// Record one retry attempt.
pub fn record_retry(module: &str) {
    counter!("chunkguard_retries_total", "module" => module.to_string()).increment(1);
}

/// Record a restart-tier activation.
pub fn record_reload(module: &str) {
    counter!("chunkguard_reloads_total", "module" => module.to_string()).increment(1);
}

/// Record a retry-loop exhaustion.
pub fn record_exhausted(module: &str) {
    counter!("chunkguard_exhausted_total", "module" => module.to_string()).increment(1);
}

/// Record a chunk fetch outcome.
pub fn record_fetch(outcome: &'static str) {
    counter!("chunkguard_fetch_total", "outcome" => outcome).increment(1);
}
