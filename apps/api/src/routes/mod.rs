pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::search::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_search_page))
        .route("/health", get(health::health_handler))
        // Search API
        .route("/api/v1/search", post(handlers::handle_search))
        .with_state(state)
}
