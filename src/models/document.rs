use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use super::todo::Todo;

/// Store-native identifier of a todo document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier taken from a request path. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid todo id: {0:?}")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidTodoId(s.to_string()))
    }
}

/// Persisted shape of a todo, one per row of the collection.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TodoDocument {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TodoDocument {
    /// Fresh document for a create request: new id, not completed, stamped now.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TodoId::new(),
            title: title.into(),
            completed: false,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

impl From<TodoDocument> for Todo {
    fn from(doc: TodoDocument) -> Self {
        Self {
            id: doc.id.to_string(),
            title: doc.title,
            completed: doc.completed,
            created_at: doc.created_at,
        }
    }
}

impl TryFrom<Todo> for TodoDocument {
    type Error = InvalidTodoId;

    fn try_from(todo: Todo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: todo.id.parse()?,
            title: todo.title,
            completed: todo.completed,
            created_at: todo.created_at,
        })
    }
}
