//! API Routes
//!
//! - `GET /` - Health check
//! - `POST /upload` - Multipart image upload
//!
//! Every route, unknown paths included, sits behind the API key gate.

pub mod health;
pub mod upload;

use axum::{extract::DefaultBodyLimit, middleware, Router};
use crate::middleware::auth_middleware;
use crate::models::AppState;
use crate::upload::MAX_FORM_BYTES;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Headroom on top of the decoded file cap for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    router_with_body_limit(state, MAX_FORM_BYTES as usize + MULTIPART_OVERHEAD_BYTES)
}

fn router_with_body_limit(state: AppState, body_limit: usize) -> Router {
    info!("Creating application router");

    Router::new()
        .merge(health::router())
        .merge(upload::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
