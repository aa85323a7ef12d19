use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::queue::ConsumerQueue;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum PublisherError {
    #[error("Subscriber with id {0} not found")]
    SubscriberNotFound(Uuid),
}

/// Record of subscribed consumer queues that receive every published item.
#[derive(Clone)]
pub struct Publisher<T> {
    subscribers: Arc<DashMap<Uuid, Arc<ConsumerQueue<T>>>>,
}

impl<T: Clone> Publisher<T> {
    /// Creates a new `Publisher` instance with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
        }
    }

    /// Registers a new consumer. Items published from now on are delivered to the returned queue.
    pub fn subscribe(&self) -> (Uuid, Arc<ConsumerQueue<T>>) {
        let id = Uuid::new_v4();
        let queue = Arc::new(ConsumerQueue::new());
        self.subscribers.insert(id, Arc::clone(&queue));
        log::debug!("Subscriber {} registered", id);
        (id, queue)
    }

    /// Removes the consumer with the given id. Items already queued stay in its queue.
    pub fn unsubscribe(&self, id: Uuid) -> Result<(), PublisherError> {
        self.subscribers
            .remove(&id)
            .map(|_| ())
            .ok_or(PublisherError::SubscriberNotFound(id))
    }

    pub fn unsubscribe_all(&self) {
        self.subscribers.clear();
    }

    /// Clones `item` into every subscribed queue. Never blocks on consumers.
    pub fn publish(&self, item: T) {
        for entry in self.subscribers.iter() {
            entry.value().enqueue(item.clone());
        }
    }

    // Returns true if nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    // Returns number of subscribers
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Clone> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}
