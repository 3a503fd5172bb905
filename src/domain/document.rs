use std::fmt;

use uuid::Uuid;

use super::StorageKey;

/// Pointer to a previously uploaded input file. Immutable once the owning
/// job has been created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReference {
    pub id: DocumentId,
    pub storage_key: StorageKey,
}

impl DocumentReference {
    pub fn new(id: DocumentId, storage_key: StorageKey) -> Self {
        Self { id, storage_key }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Owner ids come from an external identity provider and are treated as
/// opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
