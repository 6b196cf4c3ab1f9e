//! The two-tier resilient loader.
//!
//! # Responsibilities
//! - Wrap an async module factory with recovery against transient load
//!   failures (stale build manifests, network blips)
//! - Spend at most one environment restart per failure episode
//! - Run the bounded retry loop once the restart tier is spent
//!
//! # State Machine
//! ```text
//! INITIAL (marker false) --failure--> ARMED (restart fires, task halts)
//! ARMED --failure after all attempts--> ARMED (error surfaced)
//! *     --success--> INITIAL
//! ```

use std::future::Future;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::schema::DEFAULT_MARKER_KEY;
use crate::config::{LoaderConfig, RetryConfig};
use crate::error::{BoxError, LoadError, LoadResult};
use crate::loader::backoff::delay_before_attempt;
use crate::marker::{MarkerStore, ReloadMarker};
use crate::observability::metrics;
use crate::restart::RestartHandle;

/// Wraps async module factories with two-tier failure recovery.
///
/// One loader serves one module: the module label names it in logs and
/// metrics, and the marker key isolates its failure episodes from other
/// modules'. Loaders are cheap to clone and reusable indefinitely; there
/// is no terminal state.
#[derive(Clone)]
pub struct ResilientLoader {
    module: String,
    marker: ReloadMarker,
    restart: Arc<dyn RestartHandle>,
    retry: RetryConfig,
}

impl ResilientLoader {
    /// Create a loader with default retry settings and the shared
    /// default marker key.
    pub fn new(
        module: impl Into<String>,
        store: Arc<dyn MarkerStore>,
        restart: Arc<dyn RestartHandle>,
    ) -> Self {
        Self {
            module: module.into(),
            marker: ReloadMarker::new(store, DEFAULT_MARKER_KEY),
            restart,
            retry: RetryConfig::default(),
        }
    }

    /// Create a loader from a validated configuration.
    pub fn from_config(
        module: impl Into<String>,
        store: Arc<dyn MarkerStore>,
        restart: Arc<dyn RestartHandle>,
        config: &LoaderConfig,
    ) -> Self {
        Self {
            module: module.into(),
            marker: ReloadMarker::new(store, config.marker.key.clone()),
            restart,
            retry: config.retry.clone(),
        }
    }

    /// Use a dedicated marker key for this loader's episodes.
    pub fn with_marker_key(mut self, key: impl Into<String>) -> Self {
        let store = self.marker_store();
        self.marker = ReloadMarker::new(store, key);
        self
    }

    /// Override the retry settings.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The marker tracking this loader's failure episodes.
    pub fn marker(&self) -> &ReloadMarker {
        &self.marker
    }

    fn marker_store(&self) -> Arc<dyn MarkerStore> {
        self.marker.store()
    }

    /// Load the module through the given factory.
    ///
    /// Identical success semantics to calling the factory directly. On
    /// the first failure of an episode this arms the reload marker,
    /// triggers the restart handle, and never settles; once the restart
    /// tier is spent, failures go through a bounded retry loop whose
    /// exhaustion surfaces the loop's first error.
    pub async fn load<T, F, Fut>(&self, factory: F) -> LoadResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, BoxError>>,
    {
        let load_id = Uuid::new_v4();
        let was_armed = self.marker.read();

        tracing::debug!(
            load_id = %load_id,
            module = %self.module,
            armed = was_armed,
            "Loading module"
        );

        let first_err = match factory().await {
            Ok(value) => {
                self.marker.disarm();
                metrics::record_load(&self.module, true);
                return Ok(value);
            }
            Err(e) => e,
        };

        if !was_armed {
            // First failure of the episode: assume a stale build and
            // spend the one-shot restart. Arm before triggering so the
            // replacement process sees the marker.
            tracing::warn!(
                load_id = %load_id,
                module = %self.module,
                error = %first_err,
                "Module load failed, requesting environment restart"
            );
            self.marker.arm();
            metrics::record_reload(&self.module);
            self.restart.trigger();

            // The restart supersedes this task. The caller must never
            // observe a settled future from this branch.
            return std::future::pending().await;
        }

        // Restart tier already spent. The failed invocation above counts
        // as attempt 1 of the retry loop; its error is the one surfaced
        // on exhaustion.
        for attempt in 2..=self.retry.max_attempts {
            let delay = delay_before_attempt(
                self.retry.backoff,
                attempt,
                self.retry.interval_ms,
                self.retry.max_interval_ms,
            );
            tracing::info!(
                load_id = %load_id,
                module = %self.module,
                attempt,
                delay = ?delay,
                "Retrying module load"
            );
            tokio::time::sleep(delay).await;
            metrics::record_retry(&self.module);

            match factory().await {
                Ok(value) => {
                    self.marker.disarm();
                    metrics::record_load(&self.module, true);
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(
                        load_id = %load_id,
                        module = %self.module,
                        attempt,
                        error = %e,
                        "Retry failed"
                    );
                }
            }
        }

        tracing::error!(
            load_id = %load_id,
            module = %self.module,
            attempts = self.retry.max_attempts,
            error = %first_err,
            "Module load exhausted all attempts"
        );
        metrics::record_exhausted(&self.module);
        metrics::record_load(&self.module, false);

        Err(LoadError::Exhausted {
            attempts: self.retry.max_attempts,
            source: first_err,
        })
    }
}

impl std::fmt::Debug for ResilientLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientLoader")
            .field("module", &self.module)
            .field("marker_key", &self.marker.key())
            .field("max_attempts", &self.retry.max_attempts)
            .field("interval_ms", &self.retry.interval_ms)
            .finish()
    }
}
