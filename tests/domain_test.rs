use uuid::Uuid;

use kuching::domain::{DocumentId, JobId, JobStatus, OwnerId, StorageKey};

#[test]
fn given_owner_job_document_when_building_artifact_key_then_uses_path_convention() {
    let owner = OwnerId::new("user-1");
    let job = JobId::from_uuid(Uuid::nil());
    let doc = DocumentId::from_uuid(Uuid::nil());

    let key = StorageKey::artifact(&owner, job, doc);

    assert_eq!(
        key.as_str(),
        format!("user-1/{}/{}", Uuid::nil(), Uuid::nil())
    );
}

#[test]
fn given_status_strings_when_parsing_then_round_trips() {
    for status in [
        JobStatus::Pending,
        JobStatus::Processing,
        JobStatus::Completed,
        JobStatus::Error,
    ] {
        assert_eq!(status.as_str().parse::<JobStatus>(), Ok(status));
    }
}

#[test]
fn given_unknown_status_string_when_parsing_then_returns_error() {
    assert!("RUNNING".parse::<JobStatus>().is_err());
}

#[test]
fn given_terminal_statuses_when_checking_then_only_completed_and_error_are_terminal() {
    assert!(JobStatus::Completed.is_terminal());
    assert!(JobStatus::Error.is_terminal());
    assert!(!JobStatus::Pending.is_terminal());
    assert!(!JobStatus::Processing.is_terminal());
}
