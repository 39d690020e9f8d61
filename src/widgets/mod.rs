//! Per-widget state controllers.
//!
//! One controller per widget, each wrapping typed accessors over its own
//! storage keys. Controllers hold no UI state; they expose the operations a
//! renderer calls and keep every collection's order values dense through the
//! shared reconciliation in [`crate::ordering`].

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

pub mod apps;
pub mod clock;
pub mod links;
pub mod music;
pub mod notes;
pub mod pomodoro;
pub mod quote;
pub mod todos;
pub mod tools;

pub use apps::{AppGrid, AppShortcut};
pub use clock::WorldClock;
pub use links::{QuickLink, QuickLinks};
pub use music::{MusicHub, MusicLink, MusicService};
pub use notes::{AutosaveHandle, NotesPad};
pub use pomodoro::{Phase, PhaseCompletion, PomodoroWidget};
pub use quote::{QuoteBoard, QuoteCache};
pub use todos::{Todo, TodoCategory, TodoList};
pub use tools::{AiTool, ToolShelf};

static LAST_ID_MS: AtomicU64 = AtomicU64::new(0);

/// Produces a fresh item id: the current millisecond timestamp as a string.
///
/// Two items created within the same millisecond must not collide, so the
/// value is bumped past the last one handed out when the clock has not moved.
pub(crate) fn next_item_id() -> String {
    let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    let mut prev = LAST_ID_MS.load(AtomicOrdering::Relaxed);
    loop {
        let candidate = now_ms.max(prev + 1);
        match LAST_ID_MS.compare_exchange_weak(
            prev,
            candidate,
            AtomicOrdering::Relaxed,
            AtomicOrdering::Relaxed,
        ) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => prev = observed,
        }
    }
}

/// Prefixes `https://` when the input carries no scheme.
pub(crate) fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// Extracts the host portion of a normalized URL.
fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest)?;
    let host_port = rest.split(['/', '?', '#']).next()?;
    let host = host_port.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Favicon URL for a site, derived from its host. `None` when the URL has no
/// usable host.
pub(crate) fn favicon_url(url: &str) -> Option<String> {
    host_of(url).map(|host| format!("https://icons.duckduckgo.com/ip3/{host}.ico"))
}

/// The fallback icon service used when no explicit icon is given.
pub(crate) fn fallback_icon_url(url: &str) -> String {
    format!("https://www.google.com/s2/favicons?domain={url}&sz=64")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_item_id_is_unique_within_a_burst() {
        let ids: Vec<String> = (0..100).map(|_| next_item_id()).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn next_item_id_is_monotonic() {
        let a: u64 = next_item_id().parse().unwrap();
        let b: u64 = next_item_id().parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn normalize_url_prefixes_missing_scheme() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("  example.com  "), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn favicon_url_uses_the_host() {
        assert_eq!(
            favicon_url("https://docs.example.com/path?q=1").as_deref(),
            Some("https://icons.duckduckgo.com/ip3/docs.example.com.ico")
        );
        assert_eq!(
            favicon_url("https://example.com:8443/x").as_deref(),
            Some("https://icons.duckduckgo.com/ip3/example.com.ico")
        );
    }

    #[test]
    fn favicon_url_without_host_is_none() {
        assert!(favicon_url("not a url").is_none());
        assert!(favicon_url("https:///path").is_none());
    }
}
