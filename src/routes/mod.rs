//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One resource (`/api/rectangle`) plus a health probe. CORS is wide open
//! so a browser client served from any origin can call the API, and every
//! request is traced.

pub mod rectangle;


use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/rectangle", get(rectangle::get_rectangle).put(rectangle::put_rectangle))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
