//! Key-value store for widget state.
//!
//! The store persists named JSON values and notifies subscribers on every
//! successful write. It is the single shared resource of the dashboard: a
//! flat namespace of keys, each owned by one widget or by the settings
//! context, mutated only by whole-value replacement (last-write-wins, no
//! merge).
//!
//! `KvStore` is a clone-shareable handle: every clone sees the same entries
//! and the same subscriber channel. Reads take a shared lock; writes take the
//! exclusive lock, advance the in-memory copy first (the UI is optimistic),
//! then flush the backend while still holding the lock so concurrent writes
//! settle in flush order. A failed flush is surfaced to the caller instead of
//! silently dropped, but the in-memory copy is not rolled back.

use crate::store::backend::StorageBackend;
use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

#[cfg(test)]
mod tests;

pub mod accessor;
pub mod backend;

pub use accessor::Accessor;
pub use backend::{JsonFileBackend, MemoryBackend};

/// Capacity of the subscriber notification channel. Generous enough for a
/// burst of writes from a multi-key user action without dropping updates.
const SUBSCRIBER_CHANNEL_CAPACITY: usize = 256;

/// Well-known storage keys.
///
/// Every widget binds to one or more of these; the settings context owns the
/// layout and settings keys. The strings are the wire names and must not
/// change without migrating existing data files.
pub mod keys {
    /// Todo list items.
    pub const TODOS: &str = "todos";
    /// Quick link shortcuts shown under the search bar.
    pub const QUICK_LINKS: &str = "quickLinks";
    /// App shortcut grid items.
    pub const GOOGLE_APPS: &str = "googleApps";
    /// Currently visible page of the app shortcut grid.
    pub const GOOGLE_APPS_PAGE: &str = "googleAppsPage";
    /// AI tool shortcuts.
    pub const AI_TOOLS: &str = "aiTools";
    /// Music service definitions.
    pub const MUSIC_SERVICES: &str = "musicServices";
    /// Name of the preferred music service.
    pub const DEFAULT_MUSIC_SERVICE: &str = "defaultMusicService";
    /// Free-form notes text.
    pub const NOTES: &str = "notes";
    /// Extra timezone names shown by the clock.
    pub const TIMEZONES: &str = "timezones";
    /// Pomodoro durations and sound flag.
    pub const POMODORO_SETTINGS: &str = "pomodoroSettings";
    /// Pomodoro completion counters.
    pub const POMODORO_STATS: &str = "pomodoroStats";
    /// Cached quote with its fetch timestamp.
    pub const QUOTE_CACHE: &str = "quoteCache";
    /// Widget visibility and ordering.
    pub const WIDGET_LAYOUT: &str = "widgetLayout";
    /// Background type, colors and image state.
    pub const BACKGROUND_SETTINGS: &str = "backgroundSettings";
    /// Clock face and hour-format settings.
    pub const CLOCK_SETTINGS: &str = "clockSettings";
    /// Whether widgets should render light text.
    pub const USE_LIGHT_TEXT: &str = "useLightText";
    /// Whether drag-and-drop reordering is enabled.
    pub const DRAG_ENABLED: &str = "dragEnabled";
    /// Whether widgets render in compact mode.
    pub const COMPACT_MODE: &str = "compactMode";
}

/// Notification sent to subscribers after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUpdate {
    /// The key whose value changed (or was removed).
    pub key: String,
}

/// Shared key-value store backed by a [`StorageBackend`].
#[derive(Clone)]
pub struct KvStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    update_tx: broadcast::Sender<StoreUpdate>,
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("backend", &self.backend.describe())
            .field("subscriber_count", &self.update_tx.receiver_count())
            .finish()
    }
}

impl KvStore {
    /// Opens the store, loading every persisted entry from `backend`.
    pub fn open(backend: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        let entries = backend.load()?;
        tracing::debug!(
            "opened store ({}) with {} keys",
            backend.describe(),
            entries.len()
        );
        let (update_tx, _rx) = broadcast::channel(SUBSCRIBER_CHANNEL_CAPACITY);
        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
            update_tx,
            backend,
        })
    }

    /// Opens an empty store that persists nothing.
    pub fn in_memory() -> Self {
        let (update_tx, _rx) = broadcast::channel(SUBSCRIBER_CHANNEL_CAPACITY);
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            update_tx,
            backend: Arc::new(MemoryBackend),
        }
    }

    /// Subscribes to write notifications.
    ///
    /// Every subscriber receives a [`StoreUpdate`] for each successful write
    /// or removal, regardless of which clone of the handle performed it.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.update_tx.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    /// Retrieves the raw JSON value for `key`, or `None` when absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        entries.get(key).cloned()
    }

    /// Retrieves and decodes the value for `key`.
    ///
    /// Absent keys yield `Ok(None)`; a present value that does not match `T`
    /// is a [`StoreError::Decode`].
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key).await {
            None => Ok(None),
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| StoreError::Decode {
                    key: key.to_string(),
                    source: e,
                }),
        }
    }

    /// Writes `value` under `key` (whole-value replace, last-write-wins).
    ///
    /// The in-memory copy advances before the backend flush; subscribers are
    /// notified only once the flush succeeds.
    pub async fn set(&self, key: impl Into<String>, value: Value) -> Result<(), StoreError> {
        let key = key.into();
        {
            let mut entries = self.entries.write().await;
            entries.insert(key.clone(), value);
            if let Err(e) = self.backend.flush(&entries) {
                tracing::warn!("flush failed after writing '{}': {}", key, e);
                return Err(e);
            }
        }
        self.notify(&key);
        Ok(())
    }

    /// Serializes and writes `value` under `key`.
    pub async fn set_as<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value).map_err(|e| StoreError::Encode {
            key: key.to_string(),
            source: e,
        })?;
        self.set(key, value).await
    }

    /// Writes several keys under a single lock acquisition and one flush.
    ///
    /// Use this when one user action touches more than one logical entity so
    /// the entries reach the backend together.
    pub async fn set_many(&self, batch: Vec<(String, Value)>) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let keys: Vec<String> = batch.iter().map(|(k, _)| k.clone()).collect();
        {
            let mut entries = self.entries.write().await;
            for (key, value) in batch {
                entries.insert(key, value);
            }
            if let Err(e) = self.backend.flush(&entries) {
                tracing::warn!("batched flush failed for {:?}: {}", keys, e);
                return Err(e);
            }
        }
        for key in &keys {
            self.notify(key);
        }
        Ok(())
    }

    /// Removes `key`, returning its previous value.
    ///
    /// Removing an absent key is a no-op and does not notify subscribers.
    pub async fn remove(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let removed = {
            let mut entries = self.entries.write().await;
            let removed = entries.remove(key);
            if removed.is_some() {
                if let Err(e) = self.backend.flush(&entries) {
                    tracing::warn!("flush failed after removing '{}': {}", key, e);
                    return Err(e);
                }
            }
            removed
        };
        if removed.is_some() {
            self.notify(key);
        }
        Ok(removed)
    }

    /// All keys currently present, in no particular order.
    pub async fn keys(&self) -> Vec<String> {
        let entries = self.entries.read().await;
        entries.keys().cloned().collect()
    }

    fn notify(&self, key: &str) {
        let update = StoreUpdate {
            key: key.to_string(),
        };
        match self.update_tx.send(update) {
            Ok(count) => tracing::trace!("notified {} subscribers of '{}'", count, key),
            Err(_) => tracing::trace!("no subscribers for update to '{}'", key),
        }
    }
}
