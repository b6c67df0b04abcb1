pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/candidates/extract", post(handlers::handle_extract))
        .route("/api/v1/candidates/upload", post(handlers::handle_upload))
        .route("/api/v1/candidates/batch", post(handlers::handle_batch))
        .with_state(state)
}
