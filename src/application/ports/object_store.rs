use async_trait::async_trait;

use crate::domain::StorageKey;

/// Read side of blob storage: input documents uploaded ahead of time.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document as UTF-8 text. A missing key is a recoverable
    /// per-document error, surfaced as `ObjectStoreError::NotFound`.
    async fn fetch(&self, key: &StorageKey) -> Result<String, ObjectStoreError>;
}

/// Write side of blob storage: per-document output artifacts. Writes are
/// idempotent: the same key overwrites.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn put(&self, key: &StorageKey, content: &str) -> Result<(), ObjectStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ObjectStoreError {
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("not valid utf-8: {0}")]
    InvalidEncoding(String),
}
