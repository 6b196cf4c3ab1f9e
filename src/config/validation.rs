//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (attempts >= 1, timeouts > 0)
//! - Check that URLs parse before they reach the fetcher
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: LoaderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::{BackoffPolicy, LoaderConfig};

/// A single semantic validation failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("retry.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("retry.max_interval_ms ({max}) is below retry.interval_ms ({base})")]
    BackoffCapBelowBase { base: u64, max: u64 },

    #[error("marker.key must not be empty")]
    EmptyMarkerKey,

    #[error("fetch.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),

    #[error("fetch.timeout_secs must be greater than 0")]
    ZeroFetchTimeout,
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &LoaderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }

    if config.retry.backoff == BackoffPolicy::Exponential
        && config.retry.max_interval_ms < config.retry.interval_ms
    {
        errors.push(ValidationError::BackoffCapBelowBase {
            base: config.retry.interval_ms,
            max: config.retry.max_interval_ms,
        });
    }

    if config.marker.key.is_empty() {
        errors.push(ValidationError::EmptyMarkerKey);
    }

    if let Some(base_url) = &config.fetch.base_url {
        if Url::parse(base_url).is_err() {
            errors.push(ValidationError::InvalidBaseUrl(base_url.clone()));
        }
    }

    if config.fetch.timeout_secs == 0 {
        errors.push(ValidationError::ZeroFetchTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
