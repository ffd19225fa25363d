// Route table for the CodeLearn API

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/status", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_exposition))
        .route("/api/problems", get(handlers::list_problems))
        .route("/api/problems/:id", get(handlers::get_problem))
        .route("/api/submit", post(handlers::submit_code))
        .route("/api/results", get(handlers::session_results))
}
