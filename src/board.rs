//! Application root.

use crate::settings::SettingsContext;
use crate::store::backend::StorageBackend;
use crate::store::KvStore;
use crate::widgets::{
    AppGrid, MusicHub, NotesPad, PomodoroWidget, QuickLinks, QuoteBoard, TodoList, ToolShelf,
    WorldClock,
};
use crate::StoreError;
use std::sync::Arc;
use std::time::Duration;

/// The assembled dashboard: one store, one settings context, one controller
/// per widget. Everything is wired here and handed down explicitly; nothing
/// below this object reaches for globals.
#[derive(Debug, Clone)]
pub struct Dashboard {
    store: KvStore,
    settings: SettingsContext,
    todos: TodoList,
    links: QuickLinks,
    apps: AppGrid,
    tools: ToolShelf,
    notes: NotesPad,
    clock: WorldClock,
    pomodoro: PomodoroWidget,
    quote: QuoteBoard,
    music: MusicHub,
}

impl Dashboard {
    /// Opens the store on `backend`, loads the settings context, and wires
    /// every controller.
    pub async fn open(backend: Arc<dyn StorageBackend>) -> Result<Self, StoreError> {
        Self::open_with_options(backend, crate::widgets::quote::QUOTE_TTL_MS, None).await
    }

    /// [`open`](Self::open) with a custom quote TTL and notes auto-save
    /// delay, as resolved from the application config.
    pub async fn open_with_options(
        backend: Arc<dyn StorageBackend>,
        quote_ttl_ms: i64,
        notes_autosave_delay: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let store = KvStore::open(backend)?;
        let settings = SettingsContext::new(store.clone());
        settings.load().await?;

        let notes = match notes_autosave_delay {
            Some(delay) => NotesPad::with_autosave_delay(store.clone(), delay),
            None => NotesPad::new(store.clone()),
        };

        Ok(Self {
            todos: TodoList::new(store.clone()),
            links: QuickLinks::new(store.clone()),
            apps: AppGrid::new(store.clone()),
            tools: ToolShelf::new(store.clone()),
            clock: WorldClock::new(store.clone()),
            pomodoro: PomodoroWidget::new(store.clone()),
            quote: QuoteBoard::with_ttl(store.clone(), quote_ttl_ms),
            music: MusicHub::new(store.clone()),
            notes,
            settings,
            store,
        })
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn settings(&self) -> &SettingsContext {
        &self.settings
    }

    pub fn todos(&self) -> &TodoList {
        &self.todos
    }

    pub fn links(&self) -> &QuickLinks {
        &self.links
    }

    pub fn apps(&self) -> &AppGrid {
        &self.apps
    }

    pub fn tools(&self) -> &ToolShelf {
        &self.tools
    }

    pub fn notes(&self) -> &NotesPad {
        &self.notes
    }

    pub fn clock(&self) -> &WorldClock {
        &self.clock
    }

    pub fn pomodoro(&self) -> &PomodoroWidget {
        &self.pomodoro
    }

    pub fn quote(&self) -> &QuoteBoard {
        &self.quote
    }

    pub fn music(&self) -> &MusicHub {
        &self.music
    }
}
