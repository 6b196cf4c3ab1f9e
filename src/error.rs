//! Error definitions for module loading.

use thiserror::Error;

/// Boxed error type produced by module factories.
///
/// The loader does not interpret factory errors; it only decides whether
/// to restart, retry, or surface them.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the resilient loader.
///
/// A failure during the restart branch is never surfaced: the restart
/// preempts the task before the caller can observe it. The only error a
/// caller ever sees is retry exhaustion after the restart tier has
/// already been spent.
#[derive(Debug, Error)]
pub enum LoadError {
    /// All retry attempts failed after a restart had already been tried.
    /// Carries the error from the first attempt of the retry loop, which
    /// is the root cause of the episode.
    #[error("module load failed after {attempts} attempts: {source}")]
    Exhausted {
        attempts: u32,
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    /// Number of factory invocations made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
