mod config;
mod routes;
mod services;
mod state;
mod store;

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::JsonFileStore;

#[tokio::main]
async fn main() {
    // A missing .env is normal outside development.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env();
    tracing::info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        update_delay_ms = config.update_delay.as_millis(),
        min_size = config.min_size,
        enforce_width_le_height = config.enforce_width_le_height,
        canvas_width = config.canvas.width,
        canvas_height = config.canvas.height,
        "rectboard configuration loaded"
    );

    let store = JsonFileStore::new(&config.data_dir);
    let state = state::AppState::new(Arc::new(store), &config);

    if config.seed_on_start {
        services::rectangle::seed_if_missing(&state.repo, config.canvas, &state.constraints)
            .await
            .expect("failed to seed rectangle record");
    }

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "rectboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
