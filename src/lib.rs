//! Nexus Tab engine
//!
//! This crate is the state and persistence engine behind a personalizable
//! "new tab" dashboard: a key-value store with change notifications, typed
//! per-key accessors, a settings/layout context, the ordering algorithms
//! shared by every reorderable collection, and one controller per widget
//! (todos, quick links, app shortcuts, AI tools, notes, clock, pomodoro,
//! quotes, music services).
//!
//! Rendering is not this crate's business. A UI layer (or the bundled `nxt`
//! CLI) drives the controllers and draws whatever they return.

use std::path::PathBuf;

/// TOML application configuration: schema, loader, defaults, XDG paths.
pub mod config;

/// Tracing subscriber initialization for the `nxt` binary.
pub mod logging;

/// Key-value store, storage backends and typed accessors.
pub mod store;

/// Ordering and drag-reorder reconciliation shared by item collections.
pub mod ordering;

/// Settings and widget-layout context distributed to all widgets.
pub mod settings;

/// Per-widget state controllers.
pub mod widgets;

/// Application root wiring the store, context and controllers together.
mod board;
pub use board::Dashboard;

/// Errors that can occur during store and widget operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The dashboard data file could not be read.
    #[error("failed to load dashboard data: {path}")]
    Load {
        /// Path to the data file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dashboard data file exists but is not a JSON object.
    #[error("dashboard data file is not a JSON object: {path}")]
    Corrupt {
        /// Path to the data file.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A write to the underlying persistence failed.
    ///
    /// The in-memory copy has already advanced optimistically when this is
    /// returned; callers get the failure instead of a silent drop.
    #[error("failed to persist dashboard data: {path}")]
    Flush {
        /// Path to the data file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A stored value did not match the shape the accessor expected.
    #[error("stored value for key '{key}' does not match the expected shape")]
    Decode {
        /// Store key whose value failed to decode.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be serialized for storage.
    #[error("failed to encode value for key '{key}'")]
    Encode {
        /// Store key the value was destined for.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// User input was rejected before any write happened.
    #[error("{what} must not be empty")]
    EmptyInput {
        /// Which input was empty.
        what: &'static str,
    },

    /// An operation referenced an item id that is not in the collection.
    #[error("no item with id '{id}'")]
    UnknownId {
        /// The id that was not found.
        id: String,
    },
}
