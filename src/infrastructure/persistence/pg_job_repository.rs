use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{
    DocumentId, DocumentReference, Job, JobId, JobStatus, OwnerId, StorageKey,
};

/// Job metadata store backed by PostgreSQL, keyed by (owner_id, job_id).
pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id.as_uuid()))]
    async fn create(&self, job: &Job) -> Result<(), RepositoryError> {
        let documents = encode_documents(&job.documents);

        sqlx::query(
            r#"
            INSERT INTO inference_jobs
                (owner_id, job_id, prompt, documents, status, error_message, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job.owner_id.as_str())
        .bind(job.id.as_uuid())
        .bind(&job.prompt)
        .bind(documents)
        .bind(job.status.as_str())
        .bind(&job.error_message)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id.as_uuid(), owner_id = %owner))]
    async fn get(&self, owner: &OwnerId, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT owner_id, job_id, prompt, documents, status, error_message, created_at, updated_at
            FROM inference_jobs
            WHERE owner_id = $1 AND job_id = $2
            "#,
        )
        .bind(owner.as_str())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(decode_job).transpose()
    }

    #[instrument(skip(self, error_message), fields(job_id = %id.as_uuid(), owner_id = %owner, status = %status))]
    async fn update_status(
        &self,
        owner: &OwnerId,
        id: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE inference_jobs
            SET status = $3, error_message = $4, updated_at = $5
            WHERE owner_id = $1 AND job_id = $2
            "#,
        )
        .bind(owner.as_str())
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(error_message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "job {} for owner {}",
                id.as_uuid(),
                owner
            )));
        }

        Ok(())
    }
}

// Documents are stored as a JSON text column; the reference list is
// immutable once the job exists, so no relational modelling is needed.
fn encode_documents(documents: &[DocumentReference]) -> String {
    let entries: Vec<serde_json::Value> = documents
        .iter()
        .map(|d| {
            serde_json::json!({
                "document_id": d.id.as_uuid(),
                "storage_key": d.storage_key.as_str(),
            })
        })
        .collect();
    serde_json::Value::Array(entries).to_string()
}

fn decode_documents(raw: &str) -> Result<Vec<DocumentReference>, RepositoryError> {
    #[derive(serde::Deserialize)]
    struct Entry {
        document_id: Uuid,
        storage_key: String,
    }

    let entries: Vec<Entry> = serde_json::from_str(raw)
        .map_err(|e| RepositoryError::QueryFailed(format!("invalid documents column: {}", e)))?;

    Ok(entries
        .into_iter()
        .map(|e| {
            DocumentReference::new(
                DocumentId::from_uuid(e.document_id),
                StorageKey::from_raw(e.storage_key),
            )
        })
        .collect())
}

fn decode_job(row: PgRow) -> Result<Job, RepositoryError> {
    let owner_id: String = row
        .try_get("owner_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let job_id: Uuid = row
        .try_get("job_id")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let prompt: String = row
        .try_get("prompt")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let documents: String = row
        .try_get("documents")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let status: String = row
        .try_get("status")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let error_message: Option<String> = row
        .try_get("error_message")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
    let updated_at: DateTime<Utc> = row
        .try_get("updated_at")
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

    Ok(Job {
        id: JobId::from_uuid(job_id),
        owner_id: OwnerId::new(owner_id),
        prompt,
        documents: decode_documents(&documents)?,
        status: status.parse().map_err(RepositoryError::QueryFailed)?,
        error_message,
        created_at,
        updated_at,
    })
}
