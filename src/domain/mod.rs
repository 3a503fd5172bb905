mod document;
mod document_result;
mod job;
mod job_status;
mod storage_key;

pub use document::{DocumentId, DocumentReference, OwnerId};
pub use document_result::{DocumentResult, DocumentStatus};
pub use job::{Job, JobId};
pub use job_status::JobStatus;
pub use storage_key::StorageKey;
