use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::store::SqliteTodoStore;
use todo_api::{AppConfig, AppState, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "todo_api=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let store = SqliteTodoStore::connect(&config).await.inspect_err(|err| {
        error!("failed to connect to {}: {}", config.database_url, err);
    })?;
    store.ensure_collection().await?;

    let state = AppState::new(Arc::new(store));

    let app = router(state).layer(TimeoutLayer::new(config.http_timeout));

    let addr = config.socket_addr();
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
