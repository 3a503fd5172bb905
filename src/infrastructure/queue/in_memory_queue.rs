use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::{JobQueue, QueueError, QueueMessage, ReceiptHandle};

/// In-process at-least-once queue: received messages sit in flight until
/// acknowledged; released messages rejoin the front of the queue for
/// redelivery. This is where a real broker (SQS and friends) would plug in.
#[derive(Default)]
pub struct InMemoryJobQueue {
    state: Mutex<QueueState>,
}

#[derive(Default)]
struct QueueState {
    ready: VecDeque<QueueMessage>,
    in_flight: HashMap<ReceiptHandle, QueueMessage>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, body: impl Into<String>) {
        let message = QueueMessage {
            receipt: ReceiptHandle(Uuid::new_v4().to_string()),
            body: body.into(),
        };
        self.state.lock().unwrap().ready.push_back(message);
    }

    pub fn pending(&self) -> usize {
        self.state.lock().unwrap().ready.len()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn receive(&self, max_messages: usize) -> Result<Vec<QueueMessage>, QueueError> {
        let mut state = self.state.lock().unwrap();
        let mut batch = Vec::new();
        while batch.len() < max_messages {
            match state.ready.pop_front() {
                Some(message) => {
                    state
                        .in_flight
                        .insert(message.receipt.clone(), message.clone());
                    batch.push(message);
                }
                None => break,
            }
        }
        Ok(batch)
    }

    async fn acknowledge(&self, receipt: &ReceiptHandle) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        state
            .in_flight
            .remove(receipt)
            .map(|_| ())
            .ok_or_else(|| QueueError::UnknownReceipt(receipt.0.clone()))
    }

    async fn release(&self, receipt: &ReceiptHandle) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();
        match state.in_flight.remove(receipt) {
            Some(message) => {
                state.ready.push_front(message);
                Ok(())
            }
            None => Err(QueueError::UnknownReceipt(receipt.0.clone())),
        }
    }
}
