//! Environment restart capability.
//!
//! # Responsibilities
//! - Abstract the "full reload" side effect behind an injected handle
//! - Provide the production wiring (exit for a supervisor restart)
//!
//! # Design Decisions
//! - Triggering a restart is irreversible within the current process;
//!   the loader never awaits anything after calling it
//! - Tests inject a spy that records invocations and never restarts,
//!   which is what makes the "never settles" property checkable

use std::sync::atomic::{AtomicU32, Ordering};

/// Capability to restart the execution environment.
///
/// The production implementation does not return control to the caller
/// in any meaningful way; the loader holds its future pending forever
/// after triggering.
pub trait RestartHandle: Send + Sync {
    /// Request a full restart.
    fn trigger(&self);
}

/// Restart by exiting the process.
///
/// Relies on a supervisor (systemd, a container runtime, a launcher) to
/// start a replacement with fresh assets. The exit code distinguishes a
/// requested restart from a crash.
pub struct ProcessRestart {
    exit_code: i32,
}

impl ProcessRestart {
    /// Default exit code signalling a requested restart.
    pub const DEFAULT_EXIT_CODE: i32 = 75;

    pub fn new() -> Self {
        Self {
            exit_code: Self::DEFAULT_EXIT_CODE,
        }
    }

    pub fn with_exit_code(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// The code this handle will exit with.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }
}

impl Default for ProcessRestart {
    fn default() -> Self {
        Self::new()
    }
}

impl RestartHandle for ProcessRestart {
    fn trigger(&self) {
        tracing::warn!(
            exit_code = self.exit_code,
            "Restarting process to pick up fresh assets"
        );
        std::process::exit(self.exit_code);
    }
}

/// A restart handle that only counts invocations.
///
/// Used by tests and by embeddings that surface the restart request
/// through their own channel instead of exiting.
#[derive(Default)]
pub struct CountingRestart {
    count: AtomicU32,
}

impl CountingRestart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of restarts requested so far.
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

impl RestartHandle for CountingRestart {
    fn trigger(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}
