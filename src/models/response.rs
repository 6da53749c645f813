use serde::{Deserialize, Serialize};

use super::todo::Todo;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub data: Vec<Todo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreatedResponse {
    pub message: String,
    pub todo_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
