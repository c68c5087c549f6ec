// Image Upload Gateway - validates image uploads and stores them in Cloudflare R2

pub mod config;
pub mod models;
pub mod types;
pub mod storage;
pub mod upload;
pub mod routes;
pub mod middleware;
pub mod server;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
