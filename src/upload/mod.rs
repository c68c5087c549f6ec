//! Upload pipeline
//!
//! Takes a staged form and turns it into an [`ApiResponse`]:
//! - count check (1 to [`MAX_FILES`] files)
//! - per-file extension check against [`ImageKind`]
//! - random key under [`KEY_PREFIX`], streamed to the object store
//! - aggregation of per-file outcomes into a status and message
//!
//! Files are handled one after another. A failing file never stops the
//! files after it.

pub mod form;

pub use form::*;

use crate::models::ApiResponse;
use crate::storage::ObjectStore;
use crate::types::{extension, ImageKind};
use axum::http::StatusCode;
use tracing::{info, warn};
use uuid::Uuid;

/// Logical folder every object key lives under.
pub const KEY_PREFIX: &str = "uploads/";

/// Most files accepted in one request.
pub const MAX_FILES: usize = 5;

pub const MSG_INVALID_FORM: &str = "Invalid multipart form";
pub const MSG_NO_FILES: &str = "At least 1 image required";
pub const MSG_TOO_MANY_FILES: &str = "Maximum 5 images allowed";
pub const MSG_ALL_FAILED: &str = "All uploads failed";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method not allowed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    InvalidType,
    OpenFailed,
    UploadFailed,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::InvalidType => write!(f, "Invalid type"),
            FailureReason::OpenFailed => write!(f, "Failed to open"),
            FailureReason::UploadFailed => write!(f, "Upload failed"),
        }
    }
}

/// Result of handling a single staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Uploaded { url: String },
    Failed { filename: String, reason: FailureReason },
}

impl FileOutcome {
    fn failed(filename: &str, reason: FailureReason) -> Self {
        FileOutcome::Failed {
            filename: filename.to_string(),
            reason,
        }
    }
}

/// Fresh object key for a file with the given extension (leading dot included).
pub fn object_key(ext: &str) -> String {
    format!("{}{}{}", KEY_PREFIX, Uuid::new_v4(), ext)
}

pub struct UploadPipeline<'a> {
    store: &'a dyn ObjectStore,
    public_url: &'a str,
}

impl<'a> UploadPipeline<'a> {
    pub fn new(store: &'a dyn ObjectStore, public_url: &'a str) -> Self {
        Self { store, public_url }
    }

    /// Validate the file count, upload every file, and build the response.
    pub async fn handle(&self, form: &StagedForm) -> ApiResponse {
        if form.is_empty() {
            return ApiResponse::message(StatusCode::BAD_REQUEST.as_u16(), MSG_NO_FILES);
        }
        if form.len() > MAX_FILES {
            return ApiResponse::message(StatusCode::BAD_REQUEST.as_u16(), MSG_TOO_MANY_FILES);
        }

        let outcomes = self.upload_all(form.files()).await;
        summarize(outcomes)
    }

    pub async fn upload_all(&self, files: &[StagedFile]) -> Vec<FileOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            outcomes.push(self.upload_one(file).await);
        }
        outcomes
    }

    pub async fn upload_one(&self, file: &StagedFile) -> FileOutcome {
        let Some((kind, ext)) = ImageKind::from_filename(&file.filename)
            .zip(extension(&file.filename))
        else {
            return FileOutcome::failed(&file.filename, FailureReason::InvalidType);
        };

        // Dropped at the end of this call on every path.
        let mut body = match file.open().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to open staged file {}: {}", file.filename, e);
                return FileOutcome::failed(&file.filename, FailureReason::OpenFailed);
            }
        };

        let key = object_key(ext);
        match self.store.put(&key, &mut body, kind.content_type()).await {
            Ok(()) => {
                info!("Uploaded {} ({} bytes) as {}", file.filename, file.size, key);
                FileOutcome::Uploaded {
                    url: format!("{}/{}", self.public_url, key),
                }
            }
            Err(e) => {
                warn!("Upload of {} to {} failed: {}", file.filename, key, e);
                FileOutcome::failed(&file.filename, FailureReason::UploadFailed)
            }
        }
    }
}

/// Fold per-file outcomes into the response status and message.
pub fn summarize(outcomes: Vec<FileOutcome>) -> ApiResponse {
    let total = outcomes.len();
    let mut urls = Vec::new();
    let mut failed = Vec::new();

    for outcome in outcomes {
        match outcome {
            FileOutcome::Uploaded { url } => urls.push(url),
            FileOutcome::Failed { filename, reason } => failed.push(format!("{}: {}", filename, reason)),
        }
    }

    if urls.is_empty() {
        return ApiResponse::new(StatusCode::BAD_REQUEST.as_u16(), Vec::new(), failed, MSG_ALL_FAILED);
    }

    if !failed.is_empty() {
        let message = format!("{} of {} images uploaded", urls.len(), total);
        return ApiResponse::new(StatusCode::MULTI_STATUS.as_u16(), urls, failed, message);
    }

    let message = format!("{} image(s) uploaded successfully", urls.len());
    ApiResponse::new(StatusCode::OK.as_u16(), urls, Vec::new(), message)
}
