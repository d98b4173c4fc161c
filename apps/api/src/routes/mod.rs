pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screenings::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/screening", post(handlers::handle_create_screening))
        .route("/screening/:id", get(handlers::handle_get_screening))
        .route("/screening/:id/respond", post(handlers::handle_respond))
        .route("/screening/:id/start", post(handlers::handle_start_screening))
        .route("/debug/screenings", get(handlers::handle_debug_screenings))
        .with_state(state)
}
