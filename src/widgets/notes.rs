//! Notes controller with debounced auto-save.

use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Default quiet interval before an edit is persisted.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

/// Controller over the `notes` text.
#[derive(Debug, Clone)]
pub struct NotesPad {
    notes: Accessor<String>,
    autosave_delay: Duration,
}

impl NotesPad {
    pub fn new(store: KvStore) -> Self {
        Self::with_autosave_delay(store, DEFAULT_AUTOSAVE_DELAY)
    }

    pub fn with_autosave_delay(store: KvStore, autosave_delay: Duration) -> Self {
        Self {
            notes: Accessor::new(store, keys::NOTES),
            autosave_delay,
        }
    }

    /// The stored text, empty when never saved.
    pub async fn text(&self) -> Result<String, StoreError> {
        self.notes.get_or_default().await
    }

    /// Persists `text` immediately, skipping the debounce.
    pub async fn save(&self, text: &str) -> Result<(), StoreError> {
        self.notes.set(&text.to_string()).await
    }

    /// Starts the debounced auto-save loop.
    ///
    /// Feed every keystroke's full text through [`AutosaveHandle::input`];
    /// each input resets the quiet-interval timer and only a settled interval
    /// writes, so a fast typist costs one write instead of one per key.
    pub fn autosave(&self) -> AutosaveHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(autosave_loop(
            self.notes.clone(),
            self.autosave_delay,
            rx,
        ));
        AutosaveHandle { tx, task }
    }
}

enum AutosaveMsg {
    Input(String),
    Finish(oneshot::Sender<()>),
}

/// Handle to a running auto-save loop.
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<AutosaveMsg>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Submits the full current text. Resets the quiet-interval timer.
    pub fn input(&self, text: impl Into<String>) {
        // A closed loop means the task already finished; inputs after that
        // are dropped, same as typing into a torn-down widget.
        let _ = self.tx.send(AutosaveMsg::Input(text.into()));
    }

    /// Flushes any pending text and stops the loop.
    pub async fn finish(self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        if self.tx.send(AutosaveMsg::Finish(ack_tx)).is_ok() {
            let _ = ack_rx.await;
        }
        let _ = self.task.await;
    }
}

async fn autosave_loop(
    notes: Accessor<String>,
    delay: Duration,
    mut rx: mpsc::UnboundedReceiver<AutosaveMsg>,
) {
    let mut pending: Option<String> = None;
    let mut deadline = tokio::time::Instant::now();

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Some(AutosaveMsg::Input(text)) => {
                    pending = Some(text);
                    deadline = tokio::time::Instant::now() + delay;
                }
                Some(AutosaveMsg::Finish(ack)) => {
                    flush(&notes, pending.take()).await;
                    let _ = ack.send(());
                    return;
                }
                None => {
                    flush(&notes, pending.take()).await;
                    return;
                }
            },
            _ = tokio::time::sleep_until(deadline), if pending.is_some() => {
                flush(&notes, pending.take()).await;
            }
        }
    }
}

async fn flush(notes: &Accessor<String>, pending: Option<String>) {
    if let Some(text) = pending {
        if let Err(e) = notes.set(&text).await {
            tracing::warn!("notes auto-save failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn save_writes_immediately() {
        let store = KvStore::in_memory();
        let pad = NotesPad::new(store.clone());

        pad.save("written now").await.unwrap();
        assert_eq!(store.get(keys::NOTES).await, Some(json!("written now")));
    }

    #[tokio::test]
    async fn text_defaults_to_empty() {
        let pad = NotesPad::new(KvStore::in_memory());
        assert_eq!(pad.text().await.unwrap(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn autosave_writes_after_the_quiet_interval() {
        let store = KvStore::in_memory();
        let pad = NotesPad::new(store.clone());
        let handle = pad.autosave();

        handle.input("draft one");
        tokio::time::sleep(Duration::from_millis(600)).await;

        handle.finish().await;
        assert_eq!(store.get(keys::NOTES).await, Some(json!("draft one")));
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_inputs_collapse_to_the_last_value() {
        let store = KvStore::in_memory();
        let pad = NotesPad::new(store.clone());
        let mut updates = store.subscribe();
        let handle = pad.autosave();

        for text in ["d", "dr", "dra", "draft"] {
            handle.input(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;
        handle.finish().await;

        assert_eq!(store.get(keys::NOTES).await, Some(json!("draft")));
        // One settled interval means exactly one write.
        assert_eq!(updates.recv().await.unwrap().key, keys::NOTES);
        assert!(matches!(
            updates.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn finish_flushes_text_still_inside_the_interval() {
        let store = KvStore::in_memory();
        let pad = NotesPad::new(store.clone());
        let handle = pad.autosave();

        handle.input("not yet settled");
        handle.finish().await;

        assert_eq!(store.get(keys::NOTES).await, Some(json!("not yet settled")));
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay_is_honored() {
        let store = KvStore::in_memory();
        let pad = NotesPad::with_autosave_delay(store.clone(), Duration::from_millis(50));
        let handle = pad.autosave();

        handle.input("quick");
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.finish().await;

        assert_eq!(store.get(keys::NOTES).await, Some(json!("quick")));
    }
}
