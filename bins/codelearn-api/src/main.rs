mod handlers;
mod metrics;
mod routes;

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::info;

use handlers::SubmissionRecord;

/// Shared server state.
///
/// Submission history is transient and in-memory, scoped to this running
/// session; restarting the server clears it. There is no persistent
/// storage by design.
pub struct AppState {
    pub history: Mutex<Vec<SubmissionRecord>>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("CodeLearn API booting...");
    info!(
        problems = codelearn_common::problems::catalog().len(),
        "Problem catalog loaded"
    );

    let state = Arc::new(AppState {
        history: Mutex::new(Vec::new()),
    });

    // Build router
    let app = Router::new().merge(routes::routes()).with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    info!("HTTP server listening on {}", addr);
    info!("Ready to accept submissions");

    axum::serve(listener, app).await.expect("Server error");
}
