//! Todo list controller.

use crate::ordering::{reindex, sort_by_order, splice_reorder, Ordered};
use crate::store::{keys, Accessor, KvStore};
use crate::widgets::next_item_id;
use crate::StoreError;
use serde::{Deserialize, Serialize};

/// Color-coded todo category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoCategory {
    Work,
    Personal,
    Urgent,
    Later,
}

/// One todo item, stored inside the `todos` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TodoCategory>,
    pub created_at: i64,
    pub order: usize,
}

impl Ordered for Todo {
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

/// Controller over the `todos` collection.
#[derive(Debug, Clone)]
pub struct TodoList {
    todos: Accessor<Vec<Todo>>,
}

impl TodoList {
    pub fn new(store: KvStore) -> Self {
        Self {
            todos: Accessor::new(store, keys::TODOS),
        }
    }

    /// All todos in display order.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let mut todos = self.todos.get_or_default().await?;
        sort_by_order(&mut todos);
        Ok(todos)
    }

    /// Appends a new todo at the end of the list.
    ///
    /// Empty (or whitespace-only) text is rejected before any write.
    pub async fn add(
        &self,
        text: &str,
        category: Option<TodoCategory>,
    ) -> Result<Todo, StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyInput { what: "todo text" });
        }
        let mut todo = Todo {
            id: next_item_id(),
            text: text.to_string(),
            completed: false,
            category,
            created_at: chrono::Utc::now().timestamp_millis(),
            order: 0,
        };
        self.todos
            .update(|todos| {
                todo.order = todos.len();
                todos.push(todo.clone());
                reindex(todos);
            })
            .await?;
        Ok(todo)
    }

    /// Flips completion. The item's order is untouched.
    pub async fn toggle(&self, id: &str) -> Result<Todo, StoreError> {
        let mut toggled = None;
        self.todos
            .update(|todos| {
                if let Some(todo) = todos.iter_mut().find(|t| t.id == id) {
                    todo.completed = !todo.completed;
                    toggled = Some(todo.clone());
                }
            })
            .await?;
        toggled.ok_or_else(|| StoreError::UnknownId { id: id.to_string() })
    }

    /// Deletes one todo and re-densifies the survivors' orders.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut found = false;
        self.todos
            .update(|todos| {
                let before = todos.len();
                todos.retain(|t| t.id != id);
                found = todos.len() != before;
                if found {
                    sort_by_order(todos);
                    reindex(todos);
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
        self.todos
            .update(|todos| {
                sort_by_order(todos);
                changed = splice_reorder(todos, dragged_id, target_id);
            })
            .await?;
        Ok(changed)
    }
}
