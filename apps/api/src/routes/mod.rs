pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::job::handlers as job_handlers;
use crate::selection::handlers as selection_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job API
        .route("/api/v1/jobs/extract", post(job_handlers::handle_extract_job))
        // Selection API
        .route(
            "/api/v1/selections/validate",
            post(selection_handlers::handle_validate_selection),
        )
        .route(
            "/api/v1/selections/generate",
            post(selection_handlers::handle_generate_selection),
        )
        .with_state(state)
}
