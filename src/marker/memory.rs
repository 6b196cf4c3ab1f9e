//! In-memory marker storage.

use dashmap::DashMap;
use std::sync::Arc;

use crate::marker::MarkerStore;

/// A concurrent in-memory marker store.
///
/// Does not survive a process restart. Intended for tests and for
/// embeddings where the host manages marker persistence itself.
#[derive(Clone, Default)]
pub struct MemoryMarkerStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryMarkerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }
}
