use crate::config::Config;
use crate::storage::ObjectStore;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        Self { config, store }
    }
}

// API Request/Response types

/// Body returned by `/upload` and by the method guard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub urls: Vec<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<String>,
}

impl ApiResponse {
    pub fn new(status: u16, urls: Vec<String>, failed: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            urls,
            message: message.into(),
            failed,
        }
    }

    /// A response carrying only a status and message.
    pub fn message(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, Vec::new(), Vec::new(), message)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

/// 401 body emitted by the API key gate.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct UnauthorizedResponse {
    pub status: u16,
    pub message: String,
}
