//! Chunk fetching subsystem.
//!
//! # Data Flow
//! ```text
//! build pipeline publishes chunks + manifest
//!     → manifest.rs (module name → chunk path, build id)
//!     → http.rs (fetch chunk bytes, enforce timeout)
//!     → factory adapter feeds the resilient loader
//! ```
//!
//! # Design Decisions
//! - The manifest is the artifact whose staleness the restart tier
//!   recovers from: a stale manifest names chunks the server no longer
//!   serves, which presents as a 404 on fetch
//! - Non-2xx statuses are fetch failures; the loader decides what
//!   failure means
//! - The fetcher owns no retry logic of its own

pub mod http;
pub mod manifest;

use thiserror::Error;

pub use http::ChunkFetcher;
pub use manifest::AssetManifest;

/// Errors from chunk fetching and manifest handling.
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL construction or resolution failed.
    #[error("invalid chunk URL: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure (connect, timeout, body read).
    #[error("chunk request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("chunk fetch returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// The manifest has no entry for the requested module.
    #[error("module '{0}' not present in asset manifest")]
    UnknownModule(String),

    /// Manifest file could not be read.
    #[error("failed to read manifest: {0}")]
    ManifestIo(#[from] std::io::Error),

    /// Manifest contents could not be parsed.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),

    /// The fetcher has no base URL to resolve a chunk path against.
    #[error("no base URL configured for chunk path '{0}'")]
    MissingBaseUrl(String),
}
