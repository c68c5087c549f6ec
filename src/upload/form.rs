//! Multipart staging.
//!
//! Every `images` part carrying a filename is spooled into a per-request
//! temporary directory before any file is validated or uploaded, so the file
//! count can be checked up front. The directory is removed when the
//! [`StagedForm`] is dropped.

use axum::extract::multipart::{Multipart, MultipartError};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Multipart field holding the uploaded images.
pub const IMAGES_FIELD: &str = "images";

/// Cap on the combined decoded size of all staged files.
pub const MAX_FORM_BYTES: u64 = 50 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Failed to spool upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Uploaded files exceed {limit} bytes")]
    TooLarge { limit: u64 },
}

/// One file taken from the form, spooled to disk.
#[derive(Debug)]
pub struct StagedFile {
    pub filename: String,
    pub size: u64,
    path: PathBuf,
}

impl StagedFile {
    pub(crate) fn new(filename: impl Into<String>, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            filename: filename.into(),
            size,
            path: path.into(),
        }
    }

    /// Open the spooled content for reading.
    pub async fn open(&self) -> std::io::Result<File> {
        File::open(&self.path).await
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[derive(Debug)]
pub struct StagedForm {
    files: Vec<StagedFile>,
    // Held so the spool directory lives as long as the staged files.
    _dir: TempDir,
}

impl StagedForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, FormError> {
        Self::from_multipart_with_limit(multipart, MAX_FORM_BYTES).await
    }

    pub async fn from_multipart_with_limit(
        multipart: &mut Multipart,
        limit: u64,
    ) -> Result<Self, FormError> {
        let dir = tempfile::Builder::new().prefix("image-upload-").tempdir()?;
        let mut files = Vec::new();
        let mut total: u64 = 0;

        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(IMAGES_FIELD) {
                continue;
            }
            // Browsers send `filename=""` for an empty file input; that is not a file.
            let Some(filename) = field.file_name().filter(|n| !n.is_empty()).map(base_name) else {
                continue;
            };

            let path = dir.path().join(format!("part-{}", files.len()));
            let mut out = File::create(&path).await?;
            let mut size: u64 = 0;

            while let Some(chunk) = field.chunk().await? {
                size += chunk.len() as u64;
                total += chunk.len() as u64;
                if total > limit {
                    return Err(FormError::TooLarge { limit });
                }
                out.write_all(&chunk).await?;
            }
            out.flush().await?;

            files.push(StagedFile::new(filename, path, size));
        }

        Ok(Self { files, _dir: dir })
    }

    pub fn files(&self) -> &[StagedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

// Clients may send a full path; only the last segment is kept.
fn base_name(filename: &str) -> String {
    filename.rsplit('/').next().unwrap_or(filename).to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::body::Body;
    use axum::http::Request;

    const BOUNDARY: &str = "X-STAGING-BOUNDARY";

    /// One multipart part: field name, optional filename, content.
    pub type Part<'a> = (&'a str, Option<&'a str>, &'a str);

    pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                ),
            }
            body.extend_from_slice(data.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    pub fn multipart_request(uri: &str, api_key: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(key) = api_key {
            builder = builder.header("x-api-key", key);
        }
        builder.body(Body::from(multipart_body(parts))).unwrap()
    }
}
