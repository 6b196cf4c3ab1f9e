//! File-backed marker storage.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;

use crate::marker::MarkerStore;

/// A marker store persisted to a small JSON file.
///
/// This is the production analog of session storage: the file survives a
/// process restart, so an armed marker is still visible to the replacement
/// process. Every write rewrites the whole file; marker maps hold a
/// handful of keys at most.
///
/// I/O failures are logged and otherwise swallowed. A loader must never
/// fail because its marker could not be read or written; the worst case
/// is an extra restart.
#[derive(Clone)]
pub struct FileMarkerStore {
    inner: Arc<DashMap<String, String>>,
    path: PathBuf,
}

impl FileMarkerStore {
    /// Open a store at the given path, loading any existing contents.
    ///
    /// A missing file is an empty store; a corrupt file is discarded with
    /// a warning and overwritten on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let inner = Arc::new(DashMap::new());

        match read_map(&path) {
            Ok(Some(map)) => {
                for (k, v) in map {
                    inner.insert(k, v);
                }
                tracing::debug!(path = %path.display(), keys = inner.len(), "Marker file loaded");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable marker file");
            }
        }

        Self { inner, path }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let map: HashMap<String, String> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();

        let result = File::create(&self.path)
            .map_err(serde_json::Error::io)
            .and_then(|file| serde_json::to_writer(BufWriter::new(file), &map));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist marker file");
        }
    }
}

fn read_map(path: &Path) -> Result<Option<HashMap<String, String>>, serde_json::Error> {
    if !path.exists() {
        return Ok(None);
    }
    let file = File::open(path).map_err(serde_json::Error::io)?;
    let map = serde_json::from_reader(BufReader::new(file))?;
    Ok(Some(map))
}

impl MarkerStore for FileMarkerStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).map(|r| r.value().clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
        self.persist();
    }
}
