//! Tests for the key-value store.
//!
//! Tests are organized into categories:
//! - `basic`: Core get/set/remove operations
//! - `batch`: Multi-key `set_many` writes
//! - `subscriber`: Broadcast channel and notifications
//! - `accessor`: Typed per-key accessors
//! - `backend`: JSON file backend persistence

mod backend;
mod batch;

use super::{JsonFileBackend, KvStore};
use std::sync::Arc;

/// Opens a store persisting to `data.json` inside a fresh temp directory.
/// The directory guard must be kept alive for the duration of the test.
pub(super) fn file_backed_store(dir: &tempfile::TempDir) -> KvStore {
    let backend = JsonFileBackend::new(dir.path().join("data.json"));
    KvStore::open(Arc::new(backend)).expect("open file-backed store")
}
