use super::{DocumentId, StorageKey};

/// Per-document outcome of one processed job. A job can complete with any
/// mix of these; the job-level status only says processing finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    pub document_id: DocumentId,
    pub status: DocumentStatus,
    pub output_key: Option<StorageKey>,
    pub attempt_count: u32,
    pub error: Option<String>,
}

impl DocumentResult {
    pub fn success(document_id: DocumentId, output_key: StorageKey, attempt_count: u32) -> Self {
        Self {
            document_id,
            status: DocumentStatus::Success,
            output_key: Some(output_key),
            attempt_count,
            error: None,
        }
    }

    /// Degraded result: the loop finished but never extracted a valid
    /// delimited answer. The best-effort output is still persisted.
    pub fn failed(document_id: DocumentId, output_key: StorageKey, attempt_count: u32) -> Self {
        Self {
            document_id,
            status: DocumentStatus::Failed,
            output_key: Some(output_key),
            attempt_count,
            error: None,
        }
    }

    pub fn error(document_id: DocumentId, message: impl Into<String>) -> Self {
        Self {
            document_id,
            status: DocumentStatus::Error,
            output_key: None,
            attempt_count: 0,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentStatus {
    Success,
    Failed,
    Error,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Success => "SUCCESS",
            DocumentStatus::Failed => "FAILED",
            DocumentStatus::Error => "ERROR",
        }
    }
}
