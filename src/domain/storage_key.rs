use std::fmt;

use super::{DocumentId, JobId, OwnerId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    /// Artifact location for one processed document.
    pub fn artifact(owner: &OwnerId, job: JobId, document: DocumentId) -> Self {
        Self(format!(
            "{}/{}/{}",
            owner.as_str(),
            job.as_uuid(),
            document.as_uuid()
        ))
    }

    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
