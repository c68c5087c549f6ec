use axum::{Router, routing::get, Json, response::Json as ResponseJson};
use crate::models::{AppState, HealthResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
}

async fn health_check() -> ResponseJson<HealthResponse> {
    let response = HealthResponse {
        success: true,
        message: "successfully connect".to_string(),
    };

    Json(response)
}
