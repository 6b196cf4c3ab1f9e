//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! loader. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Default marker key shared by loaders that do not set their own.
pub const DEFAULT_MARKER_KEY: &str = "chunkguard.reloaded";

/// Root configuration for the resilient loader.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Retry loop settings.
    pub retry: RetryConfig,

    /// Reload marker persistence settings.
    pub marker: MarkerConfig,

    /// Chunk fetching settings.
    pub fetch: FetchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Retry configuration for the post-restart tier.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts in the retry tier, including the invocation that
    /// entered it. Must be at least 1 (1 means no extra retries).
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds.
    pub interval_ms: u64,

    /// Delay policy between attempts. Fixed is the default; exhaustion
    /// timing guarantees only hold under the fixed policy.
    pub backoff: BackoffPolicy,

    /// Maximum delay for the exponential policy in milliseconds.
    pub max_interval_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            interval_ms: 1000,
            backoff: BackoffPolicy::Fixed,
            max_interval_ms: 10_000,
        }
    }
}

/// Delay policy between retry attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackoffPolicy {
    /// Wait the same interval before every attempt.
    #[default]
    Fixed,

    /// Double the interval per attempt, capped, with up to 10% jitter.
    Exponential,
}

/// Reload marker persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Storage key for the marker. Loaders for independent modules
    /// should use distinct keys so their episodes do not interfere.
    pub key: String,

    /// Path for the file-backed store. None means in-memory only.
    pub path: Option<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_MARKER_KEY.to_string(),
            path: None,
        }
    }
}

/// Chunk fetching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL that manifest chunk paths are resolved against.
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Path to a local asset manifest file, if chunks are named rather
    /// than addressed by full URL.
    pub manifest_path: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
            manifest_path: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON-formatted logs instead of the pretty format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
