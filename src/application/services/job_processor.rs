use std::sync::Arc;

use tracing::Instrument;

use crate::application::ports::{
    ArtifactStore, DocumentStore, JobRepository, ObjectStoreError, RepositoryError, ResultNotifier,
};
use crate::domain::{DocumentReference, DocumentResult, JobId, JobStatus, OwnerId, StorageKey};

use super::generation_loop::GenerationLoop;
use super::job_message::JobMessage;

/// Orchestrates one job: per-document dispatch, status transitions,
/// artifact persistence, partial-failure aggregation.
///
/// A fault confined to one document (missing input, model API error) is
/// recorded in that document's result and processing continues; only a
/// job-fatal fault (status or artifact write failure) aborts the job and
/// moves it to ERROR.
pub struct JobProcessor {
    generation: GenerationLoop,
    documents: Arc<dyn DocumentStore>,
    artifacts: Arc<dyn ArtifactStore>,
    jobs: Arc<dyn JobRepository>,
    notifier: Arc<dyn ResultNotifier>,
}

impl JobProcessor {
    pub fn new(
        generation: GenerationLoop,
        documents: Arc<dyn DocumentStore>,
        artifacts: Arc<dyn ArtifactStore>,
        jobs: Arc<dyn JobRepository>,
        notifier: Arc<dyn ResultNotifier>,
    ) -> Self {
        Self {
            generation,
            documents,
            artifacts,
            jobs,
            notifier,
        }
    }

    pub async fn process(
        &self,
        message: &JobMessage,
    ) -> Result<Vec<DocumentResult>, JobProcessorError> {
        let owner = message.owner();
        let job = message.job();
        let span = tracing::info_span!(
            "inference_job",
            job_id = %job.as_uuid(),
            owner_id = %owner,
            documents = message.input_files.len(),
        );

        self.process_inner(&owner, job, message).instrument(span).await
    }

    async fn process_inner(
        &self,
        owner: &OwnerId,
        job: JobId,
        message: &JobMessage,
    ) -> Result<Vec<DocumentResult>, JobProcessorError> {
        // Unconditional set: redelivery of an already PROCESSING or terminal
        // job reprocesses the full document list and overwrites.
        self.update_status(owner, job, JobStatus::Processing, None)
            .await?;

        // Covers the per-document work and the terminal status write: a
        // fault in either moves the job to ERROR.
        let outcome = self.run_to_completion(owner, job, message).await;

        match outcome {
            Ok(results) => {
                self.notifier.notify(owner, job, &results).await;
                tracing::info!(results = results.len(), "Job completed");
                Ok(results)
            }
            Err(e) => {
                let error_msg = e.to_string();
                tracing::error!(error = %error_msg, "Job aborted");
                if let Err(status_err) = self
                    .update_status(owner, job, JobStatus::Error, Some(&error_msg))
                    .await
                {
                    tracing::error!(error = %status_err, "Failed to record job error status");
                }
                Err(e)
            }
        }
    }

    async fn run_to_completion(
        &self,
        owner: &OwnerId,
        job: JobId,
        message: &JobMessage,
    ) -> Result<Vec<DocumentResult>, JobProcessorError> {
        let mut results = Vec::with_capacity(message.input_files.len());
        for document in message.documents() {
            let result = self
                .process_document(owner, job, &message.prompt, &document)
                .await?;
            results.push(result);
        }

        // COMPLETED means all documents were attempted, not that they all
        // succeeded; the per-document results carry that detail.
        self.update_status(owner, job, JobStatus::Completed, None)
            .await?;
        Ok(results)
    }

    async fn process_document(
        &self,
        owner: &OwnerId,
        job: JobId,
        prompt: &str,
        document: &DocumentReference,
    ) -> Result<DocumentResult, JobProcessorError> {
        let doc_id = document.id;

        let content = match self.documents.fetch(&document.storage_key).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(
                    document_id = %doc_id.as_uuid(),
                    key = %document.storage_key,
                    error = %e,
                    "Document fetch failed, continuing with next document"
                );
                return Ok(DocumentResult::error(doc_id, e.to_string()));
            }
        };

        let outcome = match self.generation.generate(prompt, &content).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    document_id = %doc_id.as_uuid(),
                    error = %e,
                    "Model invocation failed, continuing with next document"
                );
                return Ok(DocumentResult::error(doc_id, e.to_string()));
            }
        };

        // Same key on redelivery: artifact writes are idempotent overwrites.
        let key = StorageKey::artifact(owner, job, doc_id);
        self.artifacts
            .put(&key, &outcome.text)
            .await
            .map_err(JobProcessorError::Artifact)?;

        if outcome.valid {
            Ok(DocumentResult::success(doc_id, key, outcome.attempts))
        } else {
            tracing::warn!(
                document_id = %doc_id.as_uuid(),
                attempts = outcome.attempts,
                reason = ?outcome.reason,
                "No valid response extracted, persisted best-effort output"
            );
            Ok(DocumentResult::failed(doc_id, key, outcome.attempts))
        }
    }

    async fn update_status(
        &self,
        owner: &OwnerId,
        job: JobId,
        status: JobStatus,
        error_message: Option<&str>,
    ) -> Result<(), JobProcessorError> {
        tracing::debug!(status = %status, "Job status transition");
        self.jobs
            .update_status(owner, job, status, error_message)
            .await
            .map_err(JobProcessorError::Repository)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobProcessorError {
    #[error("repository: {0}")]
    Repository(RepositoryError),
    #[error("artifact store: {0}")]
    Artifact(ObjectStoreError),
}
