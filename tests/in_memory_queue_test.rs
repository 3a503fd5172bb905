use kuching::application::ports::{JobQueue, QueueError, ReceiptHandle};
use kuching::infrastructure::queue::InMemoryJobQueue;

#[tokio::test]
async fn given_enqueued_messages_when_receiving_then_batch_respects_max() {
    let queue = InMemoryJobQueue::new();
    queue.enqueue("one");
    queue.enqueue("two");
    queue.enqueue("three");

    let batch = queue.receive(2).await.unwrap();

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].body, "one");
    assert_eq!(batch[1].body, "two");
    assert_eq!(queue.pending(), 1);
}

#[tokio::test]
async fn given_received_message_when_acknowledging_then_it_is_gone_for_good() {
    let queue = InMemoryJobQueue::new();
    queue.enqueue("one");

    let batch = queue.receive(10).await.unwrap();
    queue.acknowledge(&batch[0].receipt).await.unwrap();

    assert_eq!(queue.pending(), 0);
    assert!(queue.receive(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn given_received_message_when_releasing_then_it_is_redelivered_first() {
    let queue = InMemoryJobQueue::new();
    queue.enqueue("one");
    queue.enqueue("two");

    let batch = queue.receive(1).await.unwrap();
    queue.release(&batch[0].receipt).await.unwrap();

    let next = queue.receive(1).await.unwrap();
    assert_eq!(next[0].body, "one");
    assert_eq!(next[0].receipt, batch[0].receipt);
}

#[tokio::test]
async fn given_unknown_receipt_when_acknowledging_then_returns_error() {
    let queue = InMemoryJobQueue::new();
    let result = queue
        .acknowledge(&ReceiptHandle("nope".to_string()))
        .await;
    assert!(matches!(result, Err(QueueError::UnknownReceipt(_))));
}
