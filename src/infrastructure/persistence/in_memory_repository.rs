use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobStatus, OwnerId};

/// In-process job store with upsert semantics on status writes, mirroring
/// the metadata store's unconditional "set status" behavior. Records every
/// transition so tests can assert ordering.
#[derive(Default)]
pub struct InMemoryJobRepository {
    jobs: Mutex<HashMap<(String, Uuid), Job>>,
    transitions: Mutex<Vec<(JobId, JobStatus)>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status_of(&self, owner: &OwnerId, id: JobId) -> Option<JobStatus> {
        self.jobs
            .lock()
            .unwrap()
            .get(&(owner.as_str().to_string(), id.as_uuid()))
            .map(|job| job.status)
    }

    pub fn transitions(&self) -> Vec<(JobId, JobStatus)> {
        self.transitions.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        self.jobs.lock().unwrap().insert(
            (job.owner_id.as_str().to_string(), job.id.as_uuid()),
            job.clone(),
        );
        Ok(())
    }

    async fn get(&self, owner: &OwnerId, id: JobId) -> Result<Option<Job>, RepositoryError> {
        Ok(self
            .jobs
            .lock()
            .unwrap()
            .get(&(owner.as_str().to_string(), id.as_uuid()))
            .cloned())
    }

    async fn update_status(
        &self,
        owner: &OwnerId,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let mut jobs = self.jobs.lock().unwrap();
        let entry = jobs
            .entry((owner.as_str().to_string(), id.as_uuid()))
            .or_insert_with(|| {
                let now = Utc::now();
                Job {
                    id,
                    owner_id: owner.clone(),
                    prompt: String::new(),
                    documents: Vec::new(),
                    status,
                    error_message: None,
                    created_at: now,
                    updated_at: now,
                }
            });
        entry.status = status;
        entry.error_message = error_message.map(str::to_string);
        entry.updated_at = Utc::now();

        self.transitions.lock().unwrap().push((id, status));
        Ok(())
    }
}
