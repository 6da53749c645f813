use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire shape of a todo as exchanged with HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /todo`. Anything besides the title is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTodoRequest {
    #[serde(default)]
    pub title: String,
}

/// Body of `PUT /todo/{id}`. Id and timestamp sent by the client are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

/// A title is usable when something other than whitespace remains.
pub fn has_title(title: &str) -> bool {
    !title.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_titles_are_rejected() {
        assert!(!has_title(""));
        assert!(!has_title("   \t\n"));
        assert!(has_title(" groceries "));
    }

    #[test]
    fn new_todo_request_tolerates_missing_title_and_extra_fields() {
        let req: NewTodoRequest = serde_json::from_str(r#"{"completed":true}"#).unwrap();
        assert_eq!(req.title, "");

        let req: NewTodoRequest =
            serde_json::from_str(r#"{"title":"walk dog","completed":true}"#).unwrap();
        assert_eq!(req.title, "walk dog");
    }

    #[test]
    fn update_request_accepts_full_wire_todo() {
        let body = r#"{
            "id": "ignored",
            "title": "x",
            "completed": true,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let req: UpdateTodoRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.title, "x");
        assert!(req.completed);
    }

    #[test]
    fn todo_serializes_created_at_as_rfc3339() {
        let todo = Todo {
            id: "abc".to_string(),
            title: "Test".to_string(),
            completed: false,
            created_at: "2024-03-05T10:20:30.123Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["completed"], false);
        assert_eq!(json["created_at"], "2024-03-05T10:20:30.123Z");
    }
}
