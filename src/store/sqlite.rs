use std::str::FromStr;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::{StoreError, TodoChanges, TodoStore};
use crate::config::AppConfig;
use crate::models::{TodoDocument, TodoId};

/// Todo collection kept as one SQLite table.
#[derive(Clone)]
pub struct SqliteTodoStore {
    db: SqlitePool,
    collection: String,
    sql: Statements,
}

#[derive(Clone)]
struct Statements {
    create: String,
    select_all: String,
    insert: String,
    update: String,
    delete: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        let table = format!("\"{}\"", table.replace('"', "\"\""));
        Self {
            create: format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id BLOB PRIMARY KEY NOT NULL,
                    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                    completed INTEGER NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL
                )
                "#
            ),
            select_all: format!("SELECT id, title, completed, created_at FROM {table}"),
            insert: format!(
                "INSERT INTO {table} (id, title, completed, created_at) VALUES (?1, ?2, ?3, ?4)"
            ),
            update: format!("UPDATE {table} SET title = ?1, completed = ?2 WHERE id = ?3"),
            delete: format!("DELETE FROM {table} WHERE id = ?1"),
        }
    }
}

impl SqliteTodoStore {
    pub fn new(db: SqlitePool, collection: &str) -> Self {
        Self {
            db,
            collection: collection.to_string(),
            sql: Statements::for_table(collection),
        }
    }

    /// Opens the pool described by `config`, creating the database file if needed.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let db = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(options)
            .await?;

        info!(
            database = %config.database_url,
            collection = %config.collection,
            "connected to todo store"
        );
        Ok(Self::new(db, &config.collection))
    }

    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        sqlx::query(&self.sql.create).execute(&self.db).await?;
        debug!(collection = %self.collection, "collection ready");
        Ok(())
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn find_all(&self) -> Result<Vec<TodoDocument>, StoreError> {
        let docs = sqlx::query_as::<_, TodoDocument>(&self.sql.select_all)
            .fetch_all(&self.db)
            .await?;
        Ok(docs)
    }

    async fn insert_one(&self, doc: &TodoDocument) -> Result<TodoId, StoreError> {
        sqlx::query(&self.sql.insert)
            .bind(doc.id)
            .bind(&doc.title)
            .bind(doc.completed)
            .bind(doc.created_at)
            .execute(&self.db)
            .await?;
        Ok(doc.id)
    }

    async fn update_by_id(&self, id: TodoId, changes: &TodoChanges) -> Result<(), StoreError> {
        let result = sqlx::query(&self.sql.update)
            .bind(&changes.title)
            .bind(changes.completed)
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: TodoId) -> Result<(), StoreError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_store() -> SqliteTodoStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        let store = SqliteTodoStore::new(pool, "todo");
        store
            .ensure_collection()
            .await
            .expect("Failed to create collection");
        store
    }

    #[tokio::test]
    async fn test_insert_and_find_all() {
        let store = setup_test_store().await;

        let doc = TodoDocument::new("buy milk");
        let id = store.insert_one(&doc).await.expect("Failed to insert");
        assert_eq!(id, doc.id);

        let docs = store.find_all().await.expect("Failed to fetch");
        assert_eq!(docs, vec![doc]);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let store = setup_test_store().await;

        let doc = TodoDocument::new("draft");
        store.insert_one(&doc).await.expect("Failed to insert");

        let changes = TodoChanges {
            title: "final".to_string(),
            completed: true,
        };
        store
            .update_by_id(doc.id, &changes)
            .await
            .expect("Failed to update");

        let docs = store.find_all().await.expect("Failed to fetch");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, doc.id);
        assert_eq!(docs[0].title, "final");
        assert!(docs[0].completed);
        assert_eq!(docs[0].created_at, doc.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_document_is_not_found() {
        let store = setup_test_store().await;

        let id = TodoId::new();
        let changes = TodoChanges {
            title: "x".to_string(),
            completed: false,
        };
        let err = store.update_by_id(id, &changes).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_twice_reports_not_found() {
        let store = setup_test_store().await;

        let keep = TodoDocument::new("keep");
        let gone = TodoDocument::new("gone");
        store.insert_one(&keep).await.expect("Failed to insert");
        store.insert_one(&gone).await.expect("Failed to insert");

        store.delete_by_id(gone.id).await.expect("Failed to delete");
        let docs = store.find_all().await.expect("Failed to fetch");
        assert_eq!(docs, vec![keep]);

        let err = store.delete_by_id(gone.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_blank_title_is_refused_by_schema() {
        let store = setup_test_store().await;

        let doc = TodoDocument::new("   ");
        let err = store.insert_one(&doc).await.unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[tokio::test]
    async fn test_collection_name_is_configurable() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");

        let store = SqliteTodoStore::new(pool.clone(), "chores");
        store.ensure_collection().await.expect("Failed to create");
        store
            .insert_one(&TodoDocument::new("sweep"))
            .await
            .expect("Failed to insert");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chores")
            .fetch_one(&pool)
            .await
            .expect("Failed to count");
        assert_eq!(count, 1);
        assert_eq!(store.collection(), "chores");
    }

    #[tokio::test]
    async fn test_ping() {
        let store = setup_test_store().await;
        store.ping().await.expect("ping failed");
    }
}
