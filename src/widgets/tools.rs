//! AI tool shelf controller.

use crate::ordering::{reindex, sort_by_order, splice_reorder, Ordered};
use crate::store::{keys, Accessor, KvStore};
use crate::widgets::{fallback_icon_url, next_item_id, normalize_url};
use crate::StoreError;
use serde::{Deserialize, Serialize};

/// One AI tool shortcut, with an optional brand color behind its icon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiTool {
    pub id: String,
    pub name: String,
    pub url: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub order: usize,
}

impl Ordered for AiTool {
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

/// Controller over the `aiTools` collection.
#[derive(Debug, Clone)]
pub struct ToolShelf {
    tools: Accessor<Vec<AiTool>>,
}

impl ToolShelf {
    pub fn new(store: KvStore) -> Self {
        Self {
            tools: Accessor::new(store, keys::AI_TOOLS),
        }
    }

    /// All tools in display order.
    pub async fn list(&self) -> Result<Vec<AiTool>, StoreError> {
        let mut tools = self.tools.get_or_default().await?;
        sort_by_order(&mut tools);
        Ok(tools)
    }

    /// Appends a tool; icon defaults to the favicon service URL.
    pub async fn add(
        &self,
        name: &str,
        url: &str,
        icon: Option<String>,
        color: Option<String>,
    ) -> Result<AiTool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyInput { what: "tool name" });
        }
        if url.trim().is_empty() {
            return Err(StoreError::EmptyInput { what: "tool URL" });
        }
        let url = normalize_url(url);
        let mut tool = AiTool {
            id: next_item_id(),
            name: name.to_string(),
            icon: icon.unwrap_or_else(|| fallback_icon_url(&url)),
            color,
            url,
            order: 0,
        };
        self.tools
            .update(|tools| {
                tool.order = tools.len();
                tools.push(tool.clone());
                reindex(tools);
            })
            .await?;
        Ok(tool)
    }

    /// Deletes one tool and re-densifies the survivors' orders.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut found = false;
        self.tools
            .update(|tools| {
                let before = tools.len();
                tools.retain(|t| t.id != id);
                found = tools.len() != before;
                if found {
                    sort_by_order(tools);
                    reindex(tools);
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
        self.tools
            .update(|tools| {
                sort_by_order(tools);
                changed = splice_reorder(tools, dragged_id, target_id);
            })
            .await?;
        Ok(changed)
    }
}
