use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

/// Unbounded FIFO hand-off between one producer and a consumer.
///
/// `enqueue` never blocks the producer. Consumers either poll with
/// [`ConsumerQueue::try_drain_all`] (e.g. on a render tick) or wait with
/// [`ConsumerQueue::drain_blocking`]. Drained items are removed for good.
#[derive(Debug)]
pub struct ConsumerQueue<T> {
    items: Mutex<VecDeque<T>>,
    available: Notify,
}

impl<T> ConsumerQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `item` to the back of the queue and wakes a waiting consumer.
    pub fn enqueue(&self, item: T) {
        self.lock().push_back(item);
        self.available.notify_one();
    }

    /// Removes and returns everything currently queued, oldest first. Never waits.
    pub fn try_drain_all(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    /// Waits until at least one item is queued, then drains everything.
    pub async fn drain_blocking(&self) -> Vec<T> {
        loop {
            let items = self.try_drain_all();
            if !items.is_empty() {
                return items;
            }
            self.available.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl<T> Default for ConsumerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_enqueue_then_drain() {
        let queue = ConsumerQueue::new();
        queue.enqueue(42);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.try_drain_all(), vec![42]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_empty_queue() {
        let queue: ConsumerQueue<i32> = ConsumerQueue::new();
        assert!(queue.try_drain_all().is_empty());
    }

    #[test]
    fn test_interleaved_drains_preserve_order() {
        let queue = ConsumerQueue::new();
        let mut drained = Vec::new();
        for i in 0..20 {
            queue.enqueue(i);
            if i % 3 == 0 {
                drained.extend(queue.try_drain_all());
            }
        }
        drained.extend(queue.try_drain_all());
        assert_eq!(drained, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_drain_blocking_waits_for_item() {
        let queue = Arc::new(ConsumerQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.drain_blocking().await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!consumer.is_finished());

        queue.enqueue("sample");
        let drained = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .expect("consumer was not woken")
            .unwrap();
        assert_eq!(drained, vec!["sample"]);
    }

    #[tokio::test]
    async fn test_drain_blocking_returns_queued_items_immediately() {
        let queue = ConsumerQueue::new();
        queue.enqueue(1);
        queue.enqueue(2);
        assert_eq!(queue.drain_blocking().await, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_producer_thread_and_blocking_consumer_keep_fifo() {
        let queue = Arc::new(ConsumerQueue::new());
        let producer = {
            let queue = Arc::clone(&queue);
            std::thread::spawn(move || {
                for i in 0..1000 {
                    queue.enqueue(i);
                }
            })
        };

        let mut received = Vec::new();
        while received.len() < 1000 {
            let batch = tokio::time::timeout(Duration::from_secs(1), queue.drain_blocking())
                .await
                .expect("producer stalled");
            received.extend(batch);
        }
        producer.join().unwrap();
        assert_eq!(received, (0..1000).collect::<Vec<_>>());
    }
}
