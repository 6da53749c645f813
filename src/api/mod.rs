pub mod todo;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::state::AppState;

const HOME_PAGE: &str = include_str!("../../static/home.html");

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .merge(todo::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| AppError::store("Store unreachable", e))?;
    Ok(StatusCode::OK)
}
