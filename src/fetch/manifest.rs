//! Asset manifest handling.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::fetch::FetchError;

/// The build manifest mapping module names to chunk paths.
///
/// Published by the build pipeline next to the chunks it names. A client
/// holding an old manifest will request chunks the server no longer
/// serves; that staleness is what the loader's restart tier recovers
/// from.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AssetManifest {
    /// Identifier of the build that produced this manifest.
    #[serde(default)]
    pub build_id: Option<String>,

    /// Module name → chunk path, relative to the deployment base URL.
    #[serde(default)]
    pub chunks: HashMap<String, String>,
}

impl AssetManifest {
    /// Parse a manifest from JSON text.
    pub fn parse(json: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a manifest from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Load the manifest a configuration points at.
    ///
    /// No configured path yields an empty manifest; callers addressing
    /// chunks by full URL never need one.
    pub fn from_config(config: &crate::config::FetchConfig) -> Result<Self, FetchError> {
        match &config.manifest_path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Look up the chunk path for a module.
    pub fn chunk_path(&self, module: &str) -> Result<&str, FetchError> {
        self.chunks
            .get(module)
            .map(String::as_str)
            .ok_or_else(|| FetchError::UnknownModule(module.to_string()))
    }

    /// Resolve a module's chunk path against a base URL.
    pub fn chunk_url(&self, base: &Url, module: &str) -> Result<Url, FetchError> {
        let path = self.chunk_path(module)?;
        Ok(base.join(path)?)
    }

    /// Number of modules the manifest names.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// True if the manifest names no modules.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
