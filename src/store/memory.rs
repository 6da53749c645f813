use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, TodoChanges, TodoStore};
use crate::models::{TodoDocument, TodoId};

/// In-process collection, handy for tests and throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryTodoStore {
    docs: RwLock<HashMap<TodoId, TodoDocument>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let docs = self.docs.read().await;
        let mut all: Vec<_> = docs.values().cloned().collect();
        all.sort_by_key(|doc| doc.created_at);
        Ok(all)
    }

    async fn insert_one(&self, doc: &TodoDocument) -> Result<TodoId, StoreError> {
        self.docs.write().await.insert(doc.id, doc.clone());
        Ok(doc.id)
    }

    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let doc = docs.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        doc.title = changes.title.clone();
        doc.completed = changes.completed;
        Ok(())
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        self.docs
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
