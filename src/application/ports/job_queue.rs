use async_trait::async_trait;

/// At-least-once delivery queue of job messages.
///
/// Receiving moves a message in flight; `acknowledge` removes it for good,
/// `release` puts it back for redelivery. The consumer acknowledges and
/// releases per message so one failure never blocks its batch siblings.
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn receive(&self, max_messages: usize) -> Result<Vec<QueueMessage>, QueueError>;

    async fn acknowledge(&self, receipt: &ReceiptHandle) -> Result<(), QueueError>;

    async fn release(&self, receipt: &ReceiptHandle) -> Result<(), QueueError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub receipt: ReceiptHandle,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(pub String);

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
    #[error("unknown receipt handle: {0}")]
    UnknownReceipt(String),
}
