use std::sync::Arc;

use object_store::memory::InMemory;

use crate::application::ports::{ArtifactStore, DocumentStore, ObjectStoreError};
use crate::domain::StorageKey;

use super::local_store::{fetch_utf8, put_utf8};

/// Memory-backed blob store for tests and wiring without a filesystem.
pub struct InMemoryObjectStore {
    inner: Arc<InMemory>,
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
        }
    }

    /// Seed an input document, standing in for the external upload flow.
    pub async fn seed(&self, key: &StorageKey, content: &str) -> Result<(), ObjectStoreError> {
        put_utf8(self.inner.as_ref(), key, content).await
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryObjectStore {
    async fn fetch(&self, key: &StorageKey) -> Result<String, ObjectStoreError> {
        fetch_utf8(self.inner.as_ref(), key).await
    }
}

#[async_trait::async_trait]
impl ArtifactStore for InMemoryObjectStore {
    async fn put(&self, key: &StorageKey, content: &str) -> Result<(), ObjectStoreError> {
        put_utf8(self.inner.as_ref(), key, content).await
    }
}
