//! Task storage.
//!
//! [`TodoStore`] is the seam between the core and whatever holds the data.
//! The executor and every delivery adapter depend only on its four
//! operations, so a durable backend can replace [`MemoryStore`] without
//! touching parser or executor logic.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::types::{Todo, TodoPatch};

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// No todo matches both the id and the owner. An ownership mismatch is
    /// reported exactly like true absence.
    #[error("todo not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// TodoStore trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All todos belonging to `owner_id`, in insertion order. Never fails;
    /// an unknown owner yields an empty list.
    async fn list_by_owner(&self, owner_id: &str) -> Vec<Todo>;

    /// Append a new todo. `owner_id` must be non-empty and `text` must
    /// contain something other than whitespace; the stored text is trimmed.
    async fn create(&self, owner_id: &str, text: &str) -> Result<Todo>;

    /// Apply `patch` to the todo matching both `id` and `owner_id`. Only
    /// present fields change; `updated_at` is stamped on success.
    async fn update(&self, id: u64, owner_id: &str, patch: TodoPatch) -> Result<Todo>;

    /// Remove the todo matching both `id` and `owner_id`, returning the
    /// removed value for confirmation messaging.
    async fn delete(&self, id: u64, owner_id: &str) -> Result<Todo>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Process-local store backing the reference deployment. State lives for
/// the lifetime of the process and starts empty on every boot.
///
/// Ids come from a monotonic counter, so two creates in the same instant
/// can never collide.
pub struct MemoryStore {
    todos: RwLock<Vec<Todo>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            todos: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Total number of todos across all owners (health reporting).
    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list_by_owner(&self, owner_id: &str) -> Vec<Todo> {
        let todos = self.todos.read().await;
        todos
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect()
    }

    async fn create(&self, owner_id: &str, text: &str) -> Result<Todo> {
        if owner_id.is_empty() {
            return Err(StoreError::Validation("user id required".into()));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::Validation("task text required".into()));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let todo = Todo::new(id, owner_id, text);

        let mut todos = self.todos.write().await;
        todos.push(todo.clone());
        tracing::debug!(id, owner = owner_id, "todo created");
        Ok(todo)
    }

    async fn update(&self, id: u64, owner_id: &str, patch: TodoPatch) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id && t.owner_id == owner_id)
            .ok_or(StoreError::NotFound)?;

        if let Some(text) = patch.text {
            let text = text.trim();
            if text.is_empty() {
                return Err(StoreError::Validation("task text required".into()));
            }
            todo.text = text.to_string();
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        todo.updated_at = Some(Utc::now());
        Ok(todo.clone())
    }

    async fn delete(&self, id: u64, owner_id: &str) -> Result<Todo> {
        let mut todos = self.todos.write().await;
        let index = todos
            .iter()
            .position(|t| t.id == id && t.owner_id == owner_id)
            .ok_or(StoreError::NotFound)?;
        let removed = todos.remove(index);
        tracing::debug!(id, owner = owner_id, "todo deleted");
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_list_contains_new_todo() {
        let store = MemoryStore::new();
        let created = store.create("u1", "buy milk").await.unwrap();

        let listed = store.list_by_owner("u1").await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].text, "buy milk");
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner_in_insertion_order() {
        let store = MemoryStore::new();
        store.create("u1", "a").await.unwrap();
        store.create("u2", "other").await.unwrap();
        store.create("u1", "b").await.unwrap();
        store.create("u1", "c").await.unwrap();

        let texts: Vec<String> = store
            .list_by_owner("u1")
            .await
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(store.list_by_owner("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn ids_are_unique_across_owners() {
        let store = MemoryStore::new();
        let a = store.create("u1", "a").await.unwrap();
        let b = store.create("u2", "b").await.unwrap();
        let c = store.create("u1", "c").await.unwrap();
        assert!(a.id < b.id && b.id < c.id);
    }

    #[tokio::test]
    async fn create_rejects_empty_fields() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.create("", "x").await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.create("u1", "").await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.create("u1", "   ").await,
            Err(StoreError::Validation(_))
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn create_trims_text() {
        let store = MemoryStore::new();
        let todo = store.create("u1", "  buy milk  ").await.unwrap();
        assert_eq!(todo.text, "buy milk");
    }

    #[tokio::test]
    async fn update_applies_only_present_fields() {
        let store = MemoryStore::new();
        let todo = store.create("u1", "original").await.unwrap();

        let updated = store
            .update(todo.id, "u1", TodoPatch::completed(true))
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, "original");
        assert!(updated.updated_at.is_some());
        assert_eq!(updated.created_at, todo.created_at);

        let renamed = store
            .update(
                todo.id,
                "u1",
                TodoPatch {
                    text: Some("x".into()),
                    completed: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(renamed.text, "x");
        // Previous patch survives.
        assert!(renamed.completed);
    }

    #[tokio::test]
    async fn update_rejects_whitespace_text() {
        let store = MemoryStore::new();
        let todo = store.create("u1", "keep me").await.unwrap();

        let result = store
            .update(
                todo.id,
                "u1",
                TodoPatch {
                    text: Some("   ".into()),
                    completed: None,
                },
            )
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        // Store unchanged.
        let listed = store.list_by_owner("u1").await;
        assert_eq!(listed[0].text, "keep me");
        assert!(listed[0].updated_at.is_none());
    }

    #[tokio::test]
    async fn wrong_owner_is_indistinguishable_from_absence() {
        let store = MemoryStore::new();
        let todo = store.create("u1", "secret").await.unwrap();

        let wrong_owner = store
            .update(todo.id, "u2", TodoPatch::completed(true))
            .await;
        let missing_id = store
            .update(todo.id + 100, "u1", TodoPatch::completed(true))
            .await;
        assert_eq!(wrong_owner, missing_id);
        assert_eq!(wrong_owner, Err(StoreError::NotFound));

        assert_eq!(store.delete(todo.id, "u2").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_fails() {
        let store = MemoryStore::new();
        let todo = store.create("u1", "ephemeral").await.unwrap();

        let removed = store.delete(todo.id, "u1").await.unwrap();
        assert_eq!(removed.id, todo.id);
        assert!(store.list_by_owner("u1").await.is_empty());

        assert_eq!(store.delete(todo.id, "u1").await, Err(StoreError::NotFound));
    }
}
