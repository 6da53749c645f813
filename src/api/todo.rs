use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, put},
};
use tracing::info;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;
use crate::store::TodoChanges;

pub fn router() -> Router<AppState> {
    let collection = get(list_todos).post(create_todo);

    // The collection answers with and without the trailing slash.
    Router::new()
        .route("/todo", collection.clone())
        .route("/todo/", collection)
        .route("/todo/{id}", put(update_todo).delete(delete_todo))
}

fn parse_id(raw: &str) -> Result<TodoId, AppError> {
    TodoId::parse(raw).ok_or_else(|| AppError::bad_request("The id is invalid"))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<TodoListResponse>, AppError> {
    let docs = state
        .store
        .find_all()
        .await
        .map_err(|e| AppError::store("Failed to fetch todos", e))?;

    let data = docs.into_iter().map(Todo::from).collect();
    Ok(Json(TodoListResponse { data }))
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<NewTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoCreatedResponse>), AppError> {
    let Json(req) = payload?;
    if !has_title(&req.title) {
        return Err(AppError::bad_request("title missing"));
    }

    let doc = TodoDocument::new(req.title);
    let id = state
        .store
        .insert_one(&doc)
        .await
        .map_err(|e| AppError::store("Failed to create todo", e))?;

    info!(id = %id, title = %doc.title, "created todo");

    Ok((
        StatusCode::CREATED,
        Json(TodoCreatedResponse {
            message: "todo created successfully".to_string(),
            todo_id: id.to_string(),
        }),
    ))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    if !has_title(&req.title) {
        return Err(AppError::bad_request("title field required"));
    }

    let changes = TodoChanges {
        title: req.title,
        completed: req.completed,
    };
    state
        .store
        .update_by_id(id, &changes)
        .await
        .map_err(|e| AppError::store("Failed to update todo", e))?;

    info!(
        id = %id,
        title = %changes.title,
        completed = changes.completed,
        "updated todo"
    );

    Ok(Json(MessageResponse::new("successfully updated id")))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .delete_by_id(id)
        .await
        .map_err(|e| AppError::store("Failed to delete todo", e))?;

    info!(id = %id, "deleted todo");

    Ok(Json(MessageResponse::new("successfully deleted id")))
}
