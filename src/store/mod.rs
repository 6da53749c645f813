pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{TodoDocument, TodoId};

pub use memory::MemoryTodoStore;
pub use sqlite::SqliteTodoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Fields a client may rewrite on an existing todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: String,
    pub completed: bool,
}

/// A single collection of todo documents.
///
/// Implementations are shared by every in-flight request, so they must be
/// safe to call concurrently. Writes to the same document are last-write-wins.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every document in the collection, in store order.
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError>;

    /// Persists `doc` under its own id and returns that id.
    async fn insert_one(&self, doc: &TodoDocument) -> Result<TodoId, StoreError>;

    /// Rewrites title and completed only; id and created_at are left alone.
    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> Result<(), StoreError>;

    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError>;

    /// Cheap round trip to check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
