//! Resilient loading subsystem.
//!
//! # Data Flow
//! ```text
//! load(factory):
//!     → read reload marker
//!     → invoke factory
//!     → On success: disarm marker, return module
//!     → On failure, marker was false:
//!         arm marker → trigger restart → hold future pending forever
//!     → On failure, marker was true:
//!         backoff.rs (delay between attempts)
//!         → bounded retry loop, first success wins
//!         → exhaustion surfaces the FIRST error of the loop
//! ```
//!
//! # Design Decisions
//! - The restart tier is a one-shot heuristic for a stale build; the
//!   marker guarantees at most one restart per failure episode
//! - Fixed-interval delays by default; exhaustion latency is bounded by
//!   max_attempts x interval
//! - No cancellation path: once invoked, a load runs to success,
//!   restart, or exhaustion (known gap)

pub mod backoff;
pub mod resilient;

pub use resilient::ResilientLoader;
