//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader and fetcher produce:
//!     → logging.rs (structured log events, one load id per invocation)
//!     → metrics.rs (counters over the metrics facade)
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON or pretty)
//!     → Whatever recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; a load id correlates the attempts
//!   of one episode
//! - Metric updates are cheap counter increments
//! - This crate emits metrics but does not own an exposition endpoint

pub mod logging;
pub mod metrics;
