//! Storage backends for the key-value store.
//!
//! A backend owns the durable representation of the whole key namespace as a
//! single JSON object. `JsonFileBackend` persists it to disk with an atomic
//! temp-file-then-rename write; `MemoryBackend` keeps nothing and is used for
//! tests and ephemeral sessions.

use crate::StoreError;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for the flat key namespace.
///
/// `load` materializes every persisted key; `flush` replaces the durable copy
/// wholesale. Backends are called with the store's write lock held so that
/// two in-flight writes settle in the order their flushes complete.
pub trait StorageBackend: Send + Sync {
    /// Reads every persisted entry. An empty map is a valid fresh state.
    fn load(&self) -> Result<HashMap<String, Value>, StoreError>;

    /// Replaces the durable copy with `entries`.
    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError>;

    /// Human-readable description for logging.
    fn describe(&self) -> String;
}

/// Backend persisting the namespace as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend writing to `path`. The file and its parent
    /// directories are created on the first flush.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<HashMap<String, Value>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no data file at {:?}, starting empty", self.path);
                return Ok(HashMap::new());
            }
            Err(e) => {
                return Err(StoreError::Load {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Flush {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Encode {
            key: String::from("<document>"),
            source: e,
        })?;

        // Write to a sibling temp file, fsync, then rename into place. A
        // crash mid-write leaves the previous document intact.
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(io_err)?;
        let file = fs::File::open(&temp_path).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {:?}", self.path)
    }
}

/// Backend that persists nothing.
///
/// `load` always yields an empty namespace and `flush` always succeeds.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend;

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<HashMap<String, Value>, StoreError> {
        Ok(HashMap::new())
    }

    fn flush(&self, _entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        Ok(())
    }

    fn describe(&self) -> String {
        String::from("in-memory")
    }
}
