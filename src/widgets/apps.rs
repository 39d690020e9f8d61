//! App shortcut grid controller.

use crate::ordering::{reindex, sort_by_order, splice_reorder, Ordered};
use crate::store::{keys, Accessor, KvStore};
use crate::widgets::{fallback_icon_url, next_item_id, normalize_url};
use crate::StoreError;
use serde::{Deserialize, Serialize};

/// One tile in the app shortcut grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppShortcut {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
    pub order: usize,
}

impl Ordered for AppShortcut {
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

/// Controller over the `googleApps` grid and its `googleAppsPage` index.
#[derive(Debug, Clone)]
pub struct AppGrid {
    apps: Accessor<Vec<AppShortcut>>,
    page: Accessor<usize>,
}

impl AppGrid {
    pub fn new(store: KvStore) -> Self {
        Self {
            apps: Accessor::new(store.clone(), keys::GOOGLE_APPS),
            page: Accessor::new(store, keys::GOOGLE_APPS_PAGE),
        }
    }

    /// All shortcuts in display order.
    pub async fn list(&self) -> Result<Vec<AppShortcut>, StoreError> {
        let mut apps = self.apps.get_or_default().await?;
        sort_by_order(&mut apps);
        Ok(apps)
    }

    /// Appends a shortcut. When `icon` is absent it defaults to the favicon
    /// service URL for the site.
    pub async fn add(
        &self,
        name: &str,
        url: &str,
        icon: Option<String>,
    ) -> Result<AppShortcut, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyInput { what: "app name" });
        }
        if url.trim().is_empty() {
            return Err(StoreError::EmptyInput { what: "app URL" });
        }
        let url = normalize_url(url);
        let mut app = AppShortcut {
            id: next_item_id(),
            name: name.to_string(),
            icon: icon.unwrap_or_else(|| fallback_icon_url(&url)),
            url,
            order: 0,
        };
        self.apps
            .update(|apps| {
                app.order = apps.len();
                apps.push(app.clone());
                reindex(apps);
            })
            .await?;
        Ok(app)
    }

    /// Deletes one shortcut and re-densifies the survivors' orders.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut found = false;
        self.apps
            .update(|apps| {
                let before = apps.len();
                apps.retain(|a| a.id != id);
                found = apps.len() != before;
                if found {
                    sort_by_order(apps);
                    reindex(apps);
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
        self.apps
            .update(|apps| {
                sort_by_order(apps);
                changed = splice_reorder(apps, dragged_id, target_id);
            })
            .await?;
        Ok(changed)
    }

    /// Currently visible page of the grid (0 when never set).
    pub async fn page(&self) -> Result<usize, StoreError> {
        self.page.get_or_default().await
    }

    /// Remembers which page of the grid is showing.
    pub async fn set_page(&self, page: usize) -> Result<(), StoreError> {
        self.page.set(&page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> AppGrid {
        AppGrid::new(KvStore::in_memory())
    }

    #[tokio::test]
    async fn add_defaults_icon_to_favicon_service() {
        let grid = grid();
        let app = grid.add("Mail", "mail.example.com", None).await.unwrap();
        assert_eq!(
            app.icon,
            "https://www.google.com/s2/favicons?domain=https://mail.example.com&sz=64"
        );
    }

    #[tokio::test]
    async fn add_keeps_explicit_icon() {
        let grid = grid();
        let app = grid
            .add("Mail", "mail.example.com", Some("https://x/icon.png".into()))
            .await
            .unwrap();
        assert_eq!(app.icon, "https://x/icon.png");
    }

    #[tokio::test]
    async fn page_defaults_to_zero_and_persists() {
        let grid = grid();
        assert_eq!(grid.page().await.unwrap(), 0);
        grid.set_page(2).await.unwrap();
        assert_eq!(grid.page().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn remove_then_orders_stay_dense() {
        let grid = grid();
        let a = grid.add("a", "a.com", None).await.unwrap();
        let _b = grid.add("b", "b.com", None).await.unwrap();
        let _c = grid.add("c", "c.com", None).await.unwrap();

        grid.remove(&a.id).await.unwrap();

        let orders: Vec<usize> = grid.list().await.unwrap().iter().map(|a| a.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }
}
