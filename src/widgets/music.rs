//! Music services controller.

use crate::store::{keys, Accessor, KvStore};
use crate::StoreError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters escaped in a search query. Matches JavaScript's
/// `encodeURIComponent`: alphanumerics and `- _ . ! ~ * ' ( )` pass through.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One curated link inside a music service tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicLink {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// One music service tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicService {
    pub name: String,
    #[serde(default)]
    pub links: Vec<MusicLink>,
}

impl MusicService {
    /// The two services shipped by default, with no curated links yet.
    pub fn defaults() -> Vec<MusicService> {
        vec![
            MusicService {
                name: String::from("spotify"),
                links: Vec::new(),
            },
            MusicService {
                name: String::from("youtube"),
                links: Vec::new(),
            },
        ]
    }
}

/// Controller over `musicServices` and `defaultMusicService`.
#[derive(Debug, Clone)]
pub struct MusicHub {
    services: Accessor<Vec<MusicService>>,
    default_service: Accessor<String>,
}

impl MusicHub {
    pub fn new(store: KvStore) -> Self {
        Self {
            services: Accessor::new(store.clone(), keys::MUSIC_SERVICES),
            default_service: Accessor::new(store, keys::DEFAULT_MUSIC_SERVICE),
        }
    }

    /// The stored services, or the shipped defaults when never written.
    pub async fn services(&self) -> Result<Vec<MusicService>, StoreError> {
        let stored = self.services.get().await?;
        Ok(stored.unwrap_or_else(MusicService::defaults))
    }

    pub async fn set_services(&self, services: Vec<MusicService>) -> Result<(), StoreError> {
        self.services.set(&services).await
    }

    /// The preferred service name; `spotify` when never chosen.
    pub async fn default_service(&self) -> Result<String, StoreError> {
        let stored = self.default_service.get().await?;
        Ok(stored.unwrap_or_else(|| String::from("spotify")))
    }

    pub async fn set_default_service(&self, name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyInput { what: "service name" });
        }
        self.default_service.set(&name.to_string()).await
    }

    /// Builds the search URL for `query` on the named service. `None` for a
    /// service with no known search endpoint.
    pub fn search_url(&self, service: &str, query: &str) -> Option<String> {
        let encoded = utf8_percent_encode(query, QUERY);
        match service {
            "spotify" => Some(format!("https://open.spotify.com/search/{encoded}")),
            "youtube" => Some(format!("https://music.youtube.com/search?q={encoded}")),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> MusicHub {
        MusicHub::new(KvStore::in_memory())
    }

    #[tokio::test]
    async fn defaults_when_nothing_stored() {
        let hub = hub();
        let services = hub.services().await.unwrap();
        let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["spotify", "youtube"]);
        assert_eq!(hub.default_service().await.unwrap(), "spotify");
    }

    #[tokio::test]
    async fn default_service_selection_persists() {
        let hub = hub();
        hub.set_default_service("youtube").await.unwrap();
        assert_eq!(hub.default_service().await.unwrap(), "youtube");
    }

    #[tokio::test]
    async fn empty_service_name_is_rejected() {
        let hub = hub();
        assert!(matches!(
            hub.set_default_service("  ").await,
            Err(StoreError::EmptyInput { .. })
        ));
    }

    #[test]
    fn search_urls_encode_the_query() {
        let hub = hub();
        assert_eq!(
            hub.search_url("spotify", "blue in green").as_deref(),
            Some("https://open.spotify.com/search/blue%20in%20green")
        );
        assert_eq!(
            hub.search_url("youtube", "a&b=c").as_deref(),
            Some("https://music.youtube.com/search?q=a%26b%3Dc")
        );
        assert!(hub.search_url("tidal", "x").is_none());
    }

    #[tokio::test]
    async fn stored_services_round_trip() {
        let hub = hub();
        let services = vec![MusicService {
            name: String::from("spotify"),
            links: vec![MusicLink {
                id: String::from("1"),
                title: String::from("Liked Songs"),
                url: String::from("https://open.spotify.com/collection/tracks"),
            }],
        }];
        hub.set_services(services.clone()).await.unwrap();
        assert_eq!(hub.services().await.unwrap(), services);
    }
}
