use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{JobQueue, QueueError, QueueMessage, ReceiptHandle};

use super::job_message::JobMessage;
use super::job_processor::{JobProcessor, JobProcessorError};

/// Drains the job queue in batches, one processor invocation per message.
///
/// Messages are acknowledged or released individually, so a failure in one
/// message never blocks its batch siblings and only the failed ones become
/// eligible for redelivery.
pub struct QueueConsumer {
    queue: Arc<dyn JobQueue>,
    processor: Arc<JobProcessor>,
    batch_size: usize,
}

impl QueueConsumer {
    pub fn new(queue: Arc<dyn JobQueue>, processor: Arc<JobProcessor>, batch_size: usize) -> Self {
        Self {
            queue,
            processor,
            batch_size,
        }
    }

    /// Poll forever. Receive faults are logged and retried after the poll
    /// interval; they never terminate the worker.
    pub async fn run(&self, poll_interval: Duration) {
        tracing::info!(batch_size = self.batch_size, "Queue consumer started");
        loop {
            match self.run_once().await {
                Ok(outcome) if outcome.is_empty() => {
                    tokio::time::sleep(poll_interval).await;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Queue receive failed");
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }

    /// Receive one batch and process every message in it, reporting
    /// success/failure per message.
    pub async fn run_once(&self) -> Result<BatchOutcome, QueueError> {
        let messages = self.queue.receive(self.batch_size).await?;
        let mut outcome = BatchOutcome::default();

        for message in messages {
            match self.handle_message(&message).await {
                Ok(()) => {
                    if let Err(e) = self.queue.acknowledge(&message.receipt).await {
                        tracing::warn!(error = %e, "Failed to acknowledge message");
                    }
                    outcome.succeeded.push(message.receipt);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Job message failed, releasing for redelivery");
                    if let Err(release_err) = self.queue.release(&message.receipt).await {
                        tracing::warn!(error = %release_err, "Failed to release message");
                    }
                    outcome.failed.push((message.receipt, e));
                }
            }
        }

        Ok(outcome)
    }

    async fn handle_message(&self, message: &QueueMessage) -> Result<(), ConsumerError> {
        let job_message = JobMessage::parse(&message.body).map_err(ConsumerError::MalformedBody)?;
        self.processor
            .process(&job_message)
            .await
            .map(|_| ())
            .map_err(ConsumerError::Processing)
    }
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub succeeded: Vec<ReceiptHandle>,
    pub failed: Vec<(ReceiptHandle, ConsumerError)>,
}

impl BatchOutcome {
    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    #[error("malformed job message: {0}")]
    MalformedBody(serde_json::Error),
    #[error("processing failed: {0}")]
    Processing(JobProcessorError),
}
