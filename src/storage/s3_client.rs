// Cloudflare R2 client over rust-s3

use super::{ObjectStore, StorageError};
use crate::config::StorageConfig;
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tokio::fs::File;
use tracing::debug;

pub struct R2Store {
    bucket: Bucket,
}

impl R2Store {
    /// Bind a client to the configured bucket on the account's R2 endpoint.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let region = Region::Custom {
            region: "auto".to_string(),
            endpoint: config.endpoint(),
        };

        let credentials = Credentials::new(
            Some(&config.access_key),
            Some(&config.secret_key),
            None,
            None,
            None,
        )
        .map_err(|e| StorageError::Config(e.to_string()))?;

        let bucket = Bucket::new(&config.bucket, region, credentials)?.with_path_style();

        Ok(Self { bucket })
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[async_trait]
impl ObjectStore for R2Store {
    async fn put(&self, key: &str, body: &mut File, content_type: &str) -> Result<(), StorageError> {
        debug!("Streaming object {} to bucket {}", key, self.bucket.name());
        self.bucket
            .put_object_stream_with_content_type(body, key, content_type)
            .await?;
        Ok(())
    }
}
