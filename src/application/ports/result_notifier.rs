use async_trait::async_trait;

use crate::domain::{DocumentResult, JobId, OwnerId};

/// Optional side-channel for the per-document result set of a finished job.
/// Notification failures are logged by callers, never escalated.
#[async_trait]
pub trait ResultNotifier: Send + Sync {
    async fn notify(&self, owner: &OwnerId, job: JobId, results: &[DocumentResult]);
}

/// Default notifier: emits the result set as structured log events.
pub struct TracingNotifier;

#[async_trait]
impl ResultNotifier for TracingNotifier {
    async fn notify(&self, owner: &OwnerId, job: JobId, results: &[DocumentResult]) {
        for result in results {
            tracing::info!(
                owner_id = %owner,
                job_id = %job.as_uuid(),
                document_id = %result.document_id.as_uuid(),
                status = result.status.as_str(),
                attempts = result.attempt_count,
                error = result.error.as_deref(),
                "Document result"
            );
        }
    }
}
