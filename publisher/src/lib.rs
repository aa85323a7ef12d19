//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate hands items of type `T` from a single producer to any number of
//! consumers, without letting a slow consumer hold the producer back.
//!
//! Each consumer subscribes to a [`Publisher`] and receives its own unbounded
//! [`ConsumerQueue`]. Every published item is cloned into every queue, and each consumer
//! drains its queue at its own pace.
//!
//! ### Example
//!
//! ```
//! use publisher::Publisher;
//!
//! let publisher = Publisher::<String>::new();
//!
//! // Subscribe a consumer
//! let (id, queue) = publisher.subscribe();
//!
//! // Publish to all consumers
//! publisher.publish("Hello, World!".to_string());
//! assert_eq!(queue.try_drain_all(), vec!["Hello, World!".to_string()]);
//!
//! // Unsubscribe the consumer
//! publisher.unsubscribe(id).expect("Failed to unsubscribe");
//! assert!(publisher.is_empty());
//! ```

mod publisher;
mod queue;

pub use publisher::{Publisher, PublisherError};
pub use queue::ConsumerQueue;
