use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::{health_handler, scan_handler};
use crate::state::AppState;

/// Create the service router.
///
/// Middleware layers (CORS, request tracing) are applied by the binary so
/// tests can exercise the bare routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/scan", post(scan_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
