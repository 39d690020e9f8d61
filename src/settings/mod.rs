//! Settings and widget-layout context.
//!
//! `SettingsContext` is the one object that owns the dashboard-wide settings
//! keys: widget layout, clock, background, and the three display flags. It
//! starts in a `Loading` state where getters answer with hard-coded defaults,
//! then [`SettingsContext::load`] reads the stored values and flips it to
//! `Ready`. Getters are synchronous over an in-memory snapshot; setters
//! update the snapshot first and then write through to the store.
//!
//! The context is handed explicitly to whoever needs it; there is no global.

use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;
use std::sync::{Arc, RwLock};

pub mod schema;

pub use schema::{
    BackgroundKind, BackgroundSettings, ClockFace, ClockSettings, PomodoroSettings,
    PomodoroStats, WidgetId, WidgetLayout, WidgetLayoutEntry,
};

/// In-memory copy of every context-owned setting.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    loading: bool,
    widget_layout: WidgetLayout,
    clock: ClockSettings,
    background: BackgroundSettings,
    use_light_text: bool,
    drag_enabled: bool,
    compact_mode: bool,
}

/// Clone-shareable settings handle.
///
/// The snapshot lock is a `std::sync::RwLock` and is never held across an
/// await; reads are synchronous and writes copy out, drop the lock, then
/// persist.
#[derive(Debug, Clone)]
pub struct SettingsContext {
    snapshot: Arc<RwLock<Snapshot>>,
    layout: Accessor<WidgetLayout>,
    clock: Accessor<ClockSettings>,
    background: Accessor<BackgroundSettings>,
    use_light_text: Accessor<bool>,
    drag_enabled: Accessor<bool>,
    compact_mode: Accessor<bool>,
}

impl SettingsContext {
    /// Creates a context in the `Loading` state. Getters answer with
    /// defaults until [`load`](Self::load) completes.
    pub fn new(store: KvStore) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(Snapshot {
                loading: true,
                drag_enabled: true,
                ..Snapshot::default()
            })),
            layout: Accessor::new(store.clone(), keys::WIDGET_LAYOUT),
            clock: Accessor::new(store.clone(), keys::CLOCK_SETTINGS),
            background: Accessor::new(store.clone(), keys::BACKGROUND_SETTINGS),
            use_light_text: Accessor::new(store.clone(), keys::USE_LIGHT_TEXT),
            drag_enabled: Accessor::new(store.clone(), keys::DRAG_ENABLED),
            compact_mode: Accessor::new(store, keys::COMPACT_MODE),
        }
    }

    /// Reads every settings key and flips the context to `Ready`.
    ///
    /// Absent keys fall back to their defaults; a stored value that fails to
    /// decode is an error, not a silent reset.
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut layout = self.layout.get_or_default().await?;
        layout.normalize();
        let clock = self.clock.get_or_default().await?;
        let background = self.background.get_or_default().await?;
        let use_light_text = self.use_light_text.get().await?.unwrap_or(false);
        let drag_enabled = self.drag_enabled.get().await?.unwrap_or(true);
        let compact_mode = self.compact_mode.get().await?.unwrap_or(false);

        let mut snapshot = self.write_snapshot();
        *snapshot = Snapshot {
            loading: false,
            widget_layout: layout,
            clock,
            background,
            use_light_text,
            drag_enabled,
            compact_mode,
        };
        tracing::debug!("settings context ready");
        Ok(())
    }

    /// Whether [`load`](Self::load) has completed yet.
    pub fn is_loading(&self) -> bool {
        self.read_snapshot().loading
    }

    pub fn widget_layout(&self) -> WidgetLayout {
        self.read_snapshot().widget_layout.clone()
    }

    pub fn clock_settings(&self) -> ClockSettings {
        self.read_snapshot().clock
    }

    pub fn background_settings(&self) -> BackgroundSettings {
        self.read_snapshot().background.clone()
    }

    pub fn use_light_text(&self) -> bool {
        self.read_snapshot().use_light_text
    }

    pub fn drag_enabled(&self) -> bool {
        self.read_snapshot().drag_enabled
    }

    pub fn compact_mode(&self) -> bool {
        self.read_snapshot().compact_mode
    }

    /// Replaces the whole layout.
    pub async fn set_widget_layout(&self, layout: WidgetLayout) -> Result<(), StoreError> {
        self.write_snapshot().widget_layout = layout.clone();
        self.layout.set(&layout).await
    }

    /// Shows or hides one widget.
    pub async fn set_widget_visible(
        &self,
        id: WidgetId,
        visible: bool,
    ) -> Result<(), StoreError> {
        let layout = {
            let mut snapshot = self.write_snapshot();
            snapshot.widget_layout.set_visible(id, visible);
            snapshot.widget_layout.clone()
        };
        self.layout.set(&layout).await
    }

    /// Moves `dragged` immediately before `target` in the grid (dense
    /// reindex). No-op drops skip the write entirely.
    pub async fn move_widget(
        &self,
        dragged: WidgetId,
        target: WidgetId,
    ) -> Result<bool, StoreError> {
        let layout = {
            let mut snapshot = self.write_snapshot();
            if !snapshot.widget_layout.move_widget(dragged, target) {
                return Ok(false);
            }
            snapshot.widget_layout.clone()
        };
        self.layout.set(&layout).await?;
        Ok(true)
    }

    /// Legacy pairwise drop gesture: exchanges exactly two order values.
    pub async fn swap_widgets(&self, a: WidgetId, b: WidgetId) -> Result<bool, StoreError> {
        let layout = {
            let mut snapshot = self.write_snapshot();
            if !snapshot.widget_layout.swap_orders(a, b) {
                return Ok(false);
            }
            snapshot.widget_layout.clone()
        };
        self.layout.set(&layout).await?;
        Ok(true)
    }

    pub async fn set_clock_settings(&self, clock: ClockSettings) -> Result<(), StoreError> {
        self.write_snapshot().clock = clock;
        self.clock.set(&clock).await
    }

    pub async fn set_background_settings(
        &self,
        background: BackgroundSettings,
    ) -> Result<(), StoreError> {
        self.write_snapshot().background = background.clone();
        self.background.set(&background).await
    }

    pub async fn set_use_light_text(&self, value: bool) -> Result<(), StoreError> {
        self.write_snapshot().use_light_text = value;
        self.use_light_text.set(&value).await
    }

    pub async fn set_drag_enabled(&self, value: bool) -> Result<(), StoreError> {
        self.write_snapshot().drag_enabled = value;
        self.drag_enabled.set(&value).await
    }

    pub async fn set_compact_mode(&self, value: bool) -> Result<(), StoreError> {
        self.write_snapshot().compact_mode = value;
        self.compact_mode.set(&value).await
    }

    fn read_snapshot(&self) -> std::sync::RwLockReadGuard<'_, Snapshot> {
        self.snapshot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_snapshot(&self) -> std::sync::RwLockWriteGuard<'_, Snapshot> {
        self.snapshot.write().unwrap_or_else(|e| e.into_inner())
    }
}
