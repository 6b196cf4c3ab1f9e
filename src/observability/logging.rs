//! Structured logging initialization.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Initialize the tracing subscriber for an application embedding this
/// crate.
///
/// `RUST_LOG` takes precedence over the configured level. JSON output is
/// for production log aggregation; the pretty format is for development.
/// Calling this twice panics (the global subscriber is set once), so
/// embeddings that install their own subscriber should skip it.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chunkguard={}", config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::debug!(
        log_level = %config.log_level,
        json = config.json_logs,
        "Logging initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    // Only one test may install the global subscriber per test binary.
    #[test]
    fn test_init_installs_subscriber() {
        init(&ObservabilityConfig::default());
        tracing::info!("subscriber accepts events");
    }
}
