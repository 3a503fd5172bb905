mod job_queue;
mod job_repository;
mod model_client;
mod object_store;
mod result_notifier;

pub use job_queue::{JobQueue, QueueError, QueueMessage, ReceiptHandle};
pub use job_repository::{JobRepository, RepositoryError};
pub use model_client::{
    InvocationParams, ModelClient, ModelClientError, ModelInput, ModelOutput, Role, Turn,
};
pub use object_store::{ArtifactStore, DocumentStore, ObjectStoreError};
pub use result_notifier::{ResultNotifier, TracingNotifier};
