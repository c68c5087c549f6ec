// Shared-secret API key gate

use crate::models::{AppState, UnauthorizedResponse};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

pub const API_KEY_HEADER: &str = "x-api-key";

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing API key";

/// Reject any request whose `X-API-Key` header is not exactly the configured key.
pub async fn auth_middleware(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if !verify_api_key(provided, &state.config.auth.api_key) {
        debug!("Rejected {} {}: bad API key", req.method(), req.uri().path());
        return unauthorized();
    }

    next.run(req).await
}

pub fn verify_api_key(provided: Option<&str>, expected: &str) -> bool {
    provided == Some(expected)
}

fn unauthorized() -> Response {
    let body = UnauthorizedResponse {
        status: StatusCode::UNAUTHORIZED.as_u16(),
        message: UNAUTHORIZED_MESSAGE.to_string(),
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
