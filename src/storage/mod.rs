// Storage layer (S3-compatible)

use async_trait::async_trait;
use tokio::fs::File;

pub mod s3_client;

pub use s3_client::*;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("S3 operation failed: {0}")]
    S3(#[from] s3::error::S3Error),
}

/// Object store the upload pipeline writes into.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream `body` to `key`, tagging the object with `content_type`.
    async fn put(&self, key: &str, body: &mut File, content_type: &str) -> Result<(), StorageError>;
}
