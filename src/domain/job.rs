use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{DocumentReference, JobStatus, OwnerId};

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub owner_id: OwnerId,
    pub prompt: String,
    pub documents: Vec<DocumentReference>,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(owner_id: OwnerId, prompt: String, documents: Vec<DocumentReference>) -> Self {
        let now = Utc::now();
        Self {
            id: JobId::new(),
            owner_id,
            prompt,
            documents,
            status: JobStatus::Pending,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(Uuid);

impl JobId {
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

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}
