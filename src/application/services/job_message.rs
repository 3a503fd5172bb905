use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{DocumentId, DocumentReference, JobId, OwnerId, StorageKey};

/// Typed form of one queued job message, validated at the queue boundary.
/// A body that does not parse fails fast with a serde error instead of
/// optimistic field access downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct JobMessage {
    pub job_id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub status: Option<String>,
    pub prompt: String,
    pub input_files: Vec<InputFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputFile {
    pub document_id: Uuid,
    pub storage_key: String,
}

impl JobMessage {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn job(&self) -> JobId {
        JobId::from_uuid(self.job_id)
    }

    pub fn owner(&self) -> OwnerId {
        OwnerId::new(self.user_id.clone())
    }

    /// Document references in the order listed on the job.
    pub fn documents(&self) -> Vec<DocumentReference> {
        self.input_files
            .iter()
            .map(|f| {
                DocumentReference::new(
                    DocumentId::from_uuid(f.document_id),
                    StorageKey::from_raw(f.storage_key.clone()),
                )
            })
            .collect()
    }
}
