//! Daily quote controller with a TTL cache.

use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Cache lifetime: one hour in milliseconds.
pub const QUOTE_TTL_MS: i64 = 60 * 60 * 1000;

/// Bundled quote dataset. No network fetching happens anywhere in the crate;
/// a "refresh" draws from this list.
const QUOTES: &[(&str, &str)] = &[
    ("The only way to do great work is to love what you do.", "Steve Jobs"),
    ("Simplicity is the ultimate sophistication.", "Leonardo da Vinci"),
    ("Well begun is half done.", "Aristotle"),
    ("It always seems impossible until it's done.", "Nelson Mandela"),
    ("The journey of a thousand miles begins with one step.", "Lao Tzu"),
    ("Whether you think you can or you think you can't, you're right.", "Henry Ford"),
    ("What we think, we become.", "Buddha"),
    ("The best way to predict the future is to invent it.", "Alan Kay"),
    ("Do what you can, with what you have, where you are.", "Theodore Roosevelt"),
    ("Everything should be made as simple as possible, but not simpler.", "Albert Einstein"),
    ("The unexamined life is not worth living.", "Socrates"),
    ("Quality is not an act, it is a habit.", "Aristotle"),
    ("No wind favors he who has no destined port.", "Michel de Montaigne"),
    ("Perfection is achieved not when there is nothing more to add, but when there is nothing left to take away.", "Antoine de Saint-Exupery"),
    ("A year from now you may wish you had started today.", "Karen Lamb"),
    ("Action is the foundational key to all success.", "Pablo Picasso"),
    ("He who has a why to live can bear almost any how.", "Friedrich Nietzsche"),
    ("The obstacle is the way.", "Marcus Aurelius"),
    ("Make each day your masterpiece.", "John Wooden"),
    ("Knowing yourself is the beginning of all wisdom.", "Aristotle"),
];

/// The cached quote stored under `quoteCache`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteCache {
    pub quote: String,
    pub author: String,
    /// Millisecond timestamp of when this quote was drawn.
    pub fetched_at: i64,
}

impl QuoteCache {
    /// Whether this cache is past its TTL at `now_ms`.
    pub fn is_stale(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.fetched_at > ttl_ms
    }
}

/// Controller over the `quoteCache` key.
#[derive(Debug, Clone)]
pub struct QuoteBoard {
    cache: Accessor<QuoteCache>,
    ttl_ms: i64,
}

impl QuoteBoard {
    pub fn new(store: KvStore) -> Self {
        Self::with_ttl(store, QUOTE_TTL_MS)
    }

    pub fn with_ttl(store: KvStore, ttl_ms: i64) -> Self {
        Self {
            cache: Accessor::new(store, keys::QUOTE_CACHE),
            ttl_ms,
        }
    }

    /// The quote to display at `now_ms`.
    ///
    /// A fresh cache is returned untouched; an absent or stale one is
    /// replaced by a new random draw first.
    pub async fn current(&self, now_ms: i64) -> Result<QuoteCache, StoreError> {
        if let Some(cached) = self.cache.get().await? {
            if !cached.is_stale(now_ms, self.ttl_ms) {
                return Ok(cached);
            }
            tracing::debug!("quote cache stale, drawing a new one");
        }
        self.refresh(now_ms).await
    }

    /// Draws a new random quote and replaces the cache unconditionally.
    pub async fn refresh(&self, now_ms: i64) -> Result<QuoteCache, StoreError> {
        let (quote, author) = QUOTES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(QUOTES[0]);
        let fresh = QuoteCache {
            quote: quote.to_string(),
            author: author.to_string(),
            fetched_at: now_ms,
        };
        self.cache.set(&fresh).await?;
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(store: &KvStore) -> QuoteBoard {
        QuoteBoard::new(store.clone())
    }

    #[tokio::test]
    async fn first_access_draws_and_caches() {
        let store = KvStore::in_memory();
        let board = board(&store);

        let shown = board.current(1_000_000).await.unwrap();
        assert_eq!(shown.fetched_at, 1_000_000);
        assert!(QUOTES.iter().any(|(q, a)| *q == shown.quote && *a == shown.author));

        let stored: QuoteCache =
            serde_json::from_value(store.get(keys::QUOTE_CACHE).await.unwrap()).unwrap();
        assert_eq!(stored, shown);
    }

    #[tokio::test]
    async fn fresh_cache_is_never_replaced() {
        let store = KvStore::in_memory();
        let board = board(&store);

        let first = board.current(1_000_000).await.unwrap();
        // One millisecond later: still the exact same cache entry.
        let second = board.current(1_000_001).await.unwrap();
        assert_eq!(second, first);

        // Right at the TTL boundary it is still fresh.
        let at_ttl = board.current(1_000_000 + QUOTE_TTL_MS).await.unwrap();
        assert_eq!(at_ttl, first);
    }

    #[tokio::test]
    async fn stale_cache_is_replaced() {
        let store = KvStore::in_memory();
        let board = board(&store);

        let first = board.current(1_000_000).await.unwrap();
        let later = board.current(1_000_001 + QUOTE_TTL_MS).await.unwrap();
        assert_eq!(later.fetched_at, 1_000_001 + QUOTE_TTL_MS);
        assert!(later.fetched_at > first.fetched_at);
    }

    #[tokio::test]
    async fn manual_refresh_always_replaces() {
        let store = KvStore::in_memory();
        let board = board(&store);

        board.current(1_000_000).await.unwrap();
        let refreshed = board.refresh(1_000_005).await.unwrap();
        assert_eq!(refreshed.fetched_at, 1_000_005);

        let shown = board.current(1_000_006).await.unwrap();
        assert_eq!(shown, refreshed);
    }

    #[tokio::test]
    async fn custom_ttl_is_honored() {
        let store = KvStore::in_memory();
        let board = QuoteBoard::with_ttl(store, 100);

        let first = board.current(0).await.unwrap();
        assert_eq!(board.current(100).await.unwrap(), first);
        assert_eq!(board.current(101).await.unwrap().fetched_at, 101);
    }
}
