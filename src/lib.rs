//! Resilient loading for code-split module bundles.
//!
//! # Architecture Overview
//!
//! ```text
//! Caller requests a module:
//!     → loader (read reload marker, invoke factory)
//!     → On success: disarm marker, return module
//!     → On first failure of an episode: arm marker, trigger restart,
//!       never settle (the restart supersedes the task)
//!     → On post-restart failure: bounded fixed-interval retry loop
//!     → On exhaustion: surface the first-seen error
//!
//! Cross-cutting: config, marker persistence, observability
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod marker;
pub mod observability;
pub mod restart;

pub use config::LoaderConfig;
pub use error::{BoxError, LoadError};
pub use loader::ResilientLoader;
pub use marker::{MarkerStore, MemoryMarkerStore, ReloadMarker};
pub use restart::RestartHandle;
