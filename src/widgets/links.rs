//! Quick links controller.

use crate::ordering::{reindex, sort_by_order, splice_reorder, Ordered};
use crate::store::{keys, Accessor, KvStore};
use crate::widgets::{favicon_url, next_item_id, normalize_url};
use crate::StoreError;
use serde::{Deserialize, Serialize};

/// One shortcut shown under the search bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickLink {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    pub order: usize,
}

impl Ordered for QuickLink {
    fn id(&self) -> &str {
        &self.id
    }
    fn order(&self) -> usize {
        self.order
    }
    fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

/// Controller over the `quickLinks` collection.
///
/// URLs are normalized on the way in (a bare `example.com` becomes
/// `https://example.com`) and the favicon URL is derived from the host, so
/// the renderer only ever sees ready-to-use values. No fetching happens here.
#[derive(Debug, Clone)]
pub struct QuickLinks {
    links: Accessor<Vec<QuickLink>>,
}

impl QuickLinks {
    pub fn new(store: KvStore) -> Self {
        Self {
            links: Accessor::new(store, keys::QUICK_LINKS),
        }
    }

    /// All links in display order.
    pub async fn list(&self) -> Result<Vec<QuickLink>, StoreError> {
        let mut links = self.links.get_or_default().await?;
        sort_by_order(&mut links);
        Ok(links)
    }

    /// Appends a new link. Title and URL must be non-empty.
    pub async fn add(&self, title: &str, url: &str) -> Result<QuickLink, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyInput { what: "link title" });
        }
        if url.trim().is_empty() {
            return Err(StoreError::EmptyInput { what: "link URL" });
        }
        let url = normalize_url(url);
        let mut link = QuickLink {
            id: next_item_id(),
            title: title.to_string(),
            favicon: favicon_url(&url),
            url,
            order: 0,
        };
        self.links
            .update(|links| {
                link.order = links.len();
                links.push(link.clone());
                reindex(links);
            })
            .await?;
        Ok(link)
    }

    /// Rewrites one link's title and URL; the favicon is re-derived from the
    /// new URL.
    pub async fn edit(&self, id: &str, title: &str, url: &str) -> Result<QuickLink, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyInput { what: "link title" });
        }
        if url.trim().is_empty() {
            return Err(StoreError::EmptyInput { what: "link URL" });
        }
        let url = normalize_url(url);
        let mut edited = None;
        self.links
            .update(|links| {
                if let Some(link) = links.iter_mut().find(|l| l.id == id) {
                    link.title = title.to_string();
                    link.favicon = favicon_url(&url);
                    link.url = url.clone();
                    edited = Some(link.clone());
                }
            })
            .await?;
        edited.ok_or_else(|| StoreError::UnknownId { id: id.to_string() })
    }

    /// Deletes one link and re-densifies the survivors' orders.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut found = false;
        self.links
            .update(|links| {
                let before = links.len();
                links.retain(|l| l.id != id);
                found = links.len() != before;
                if found {
                    sort_by_order(links);
                    reindex(links);
                }
            })
            .await?;
        if found {
            Ok(())
        } else {
            Err(StoreError::UnknownId { id: id.to_string() })
        }
    }

    /// Drag-reorders `dragged_id` immediately before `target_id`.
    pub async fn reorder(&self, dragged_id: &str, target_id: &str) -> Result<bool, StoreError> {
        let mut changed = false;
        self.links
            .update(|links| {
                sort_by_order(links);
                changed = splice_reorder(links, dragged_id, target_id);
            })
            .await?;
        Ok(changed)
    }
}
