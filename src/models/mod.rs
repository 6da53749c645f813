pub mod document;
pub mod response;
pub mod todo;

pub use document::{InvalidTodoId, TodoDocument, TodoId};
pub use response::{MessageResponse, TodoCreatedResponse, TodoListResponse};
pub use todo::{NewTodoRequest, Todo, UpdateTodoRequest, has_title};
