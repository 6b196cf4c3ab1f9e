//! Reload marker persistence.
//!
//! # Data Flow
//! ```text
//! loader reads marker at episode start
//!     → false: first failure arms the marker, then restart fires
//!     → true: a restart already happened; failures go to the retry loop
//! Any success disarms the marker so the next episode starts fresh.
//! ```
//!
//! # Design Decisions
//! - Storage is an injected get/set key-value seam so tests can use an
//!   in-memory fake instead of the real persisted store
//! - Wire form is the string literal "true" or "false"; an absent or
//!   unrecognized value reads as false
//! - Store I/O failures degrade to "absent"; the loader never fails
//!   because of the marker store

pub mod file;
pub mod memory;

use std::sync::Arc;

pub use file::FileMarkerStore;
pub use memory::MemoryMarkerStore;

use crate::config::MarkerConfig;

/// Build the marker store a configuration asks for.
///
/// A configured path selects the file-backed store; otherwise markers
/// live in memory and will not survive a process restart.
pub fn store_from_config(config: &MarkerConfig) -> Arc<dyn MarkerStore> {
    match &config.path {
        Some(path) => Arc::new(FileMarkerStore::open(path)),
        None => Arc::new(MemoryMarkerStore::new()),
    }
}

/// Persisted key-value storage for reload markers.
///
/// Implementations must survive a process restart to be useful in
/// production; the in-memory store exists for tests and for embeddings
/// that manage restarts themselves.
pub trait MarkerStore: Send + Sync {
    /// Read the raw value for a key. None means the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the raw value for a key, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
}

/// The persisted "have we already restarted for this episode" flag.
///
/// Owns the serialized form of the boolean and the single storage key it
/// lives under.
#[derive(Clone)]
pub struct ReloadMarker {
    store: Arc<dyn MarkerStore>,
    key: String,
}

impl ReloadMarker {
    /// Create a marker over the given store and key.
    pub fn new(store: Arc<dyn MarkerStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Read the marker. Absent or unrecognized values read as false.
    pub fn read(&self) -> bool {
        matches!(self.store.get(&self.key).as_deref(), Some("true"))
    }

    /// Record that a restart has been spent for the current episode.
    pub fn arm(&self) {
        self.store.set(&self.key, "true");
    }

    /// Reset the marker so a future episode starts fresh.
    pub fn disarm(&self) {
        self.store.set(&self.key, "false");
    }

    /// The storage key this marker lives under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// A handle to the underlying store, for rebinding to another key.
    pub fn store(&self) -> Arc<dyn MarkerStore> {
        self.store.clone()
    }
}

impl std::fmt::Debug for ReloadMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReloadMarker")
            .field("key", &self.key)
            .field("armed", &self.read())
            .finish()
    }
}
