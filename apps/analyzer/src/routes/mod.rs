pub mod form;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::form_handler))
        .route("/health", get(health::health_handler))
        .route("/analyze-resume", post(handlers::handle_analyze_resume))
        .with_state(state)
}
