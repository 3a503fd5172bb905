use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{ArtifactStore, DocumentStore, ObjectStoreError};
use crate::domain::StorageKey;

/// Filesystem-backed blob store for local runs; the same struct serves the
/// read side (input documents) and the write side (output artifacts),
/// typically constructed once per bucket directory.
pub struct LocalObjectStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalObjectStore {
    pub fn new(base_path: PathBuf) -> Result<Self, ObjectStoreError> {
        std::fs::create_dir_all(&base_path)
            .map_err(|e| ObjectStoreError::UploadFailed(e.to_string()))?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ObjectStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for LocalObjectStore {
    async fn fetch(&self, key: &StorageKey) -> Result<String, ObjectStoreError> {
        fetch_utf8(self.inner.as_ref(), key).await
    }
}

#[async_trait::async_trait]
impl ArtifactStore for LocalObjectStore {
    async fn put(&self, key: &StorageKey, content: &str) -> Result<(), ObjectStoreError> {
        put_utf8(self.inner.as_ref(), key, content).await
    }
}

pub(super) async fn fetch_utf8(
    store: &dyn ObjectStore,
    key: &StorageKey,
) -> Result<String, ObjectStoreError> {
    let store_path = StorePath::from(key.as_str());
    let result = store.get(&store_path).await.map_err(|e| match e {
        object_store::Error::NotFound { .. } => ObjectStoreError::NotFound(key.to_string()),
        other => ObjectStoreError::DownloadFailed(other.to_string()),
    })?;

    let bytes = result
        .bytes()
        .await
        .map_err(|e| ObjectStoreError::DownloadFailed(e.to_string()))?;

    String::from_utf8(bytes.to_vec()).map_err(|e| ObjectStoreError::InvalidEncoding(e.to_string()))
}

pub(super) async fn put_utf8(
    store: &dyn ObjectStore,
    key: &StorageKey,
    content: &str,
) -> Result<(), ObjectStoreError> {
    let store_path = StorePath::from(key.as_str());
    store
        .put(&store_path, PutPayload::from(content.as_bytes().to_vec()))
        .await
        .map_err(|e| ObjectStoreError::UploadFailed(e.to_string()))?;
    Ok(())
}
