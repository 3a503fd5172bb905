use async_trait::async_trait;

use crate::domain::{Job, JobId, JobStatus, OwnerId};

/// Metadata store for job records, keyed by the full composite
/// (owner_id, job_id) pair. Status writes refresh `updated_at`.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get(&self, owner: &OwnerId, id: JobId) -> Result<Option<Job>, RepositoryError>;

    async fn update_status(
        &self,
        owner: &OwnerId,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("not found: {0}")]
    NotFound(String),
}
