use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::constants::DEFAULT_BUFFER_CAPACITY;
use crate::types::buffers::CircularBuffer;

/// Thread-safe history of the most recent `capacity` elements, oldest first.
///
/// Elements are stored behind an `Arc` so the history can be shared with other
/// consumers without copying. Eviction is strictly FIFO; reads never affect it.
/// Every operation takes the lock once, so readers never see a half-applied push.
#[derive(Debug)]
pub struct RollingBuffer<T> {
    inner: RwLock<CircularBuffer<Arc<T>>>,
}

impl<T> RollingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CircularBuffer::new(capacity)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, CircularBuffer<Arc<T>>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CircularBuffer<Arc<T>>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `elem`, evicting and returning the oldest element if the buffer is full.
    pub fn push(&self, elem: Arc<T>) -> Option<Arc<T>> {
        self.write().push(elem)
    }

    /// Most recent element, or `None` if nothing was pushed yet.
    pub fn latest(&self) -> Option<Arc<T>> {
        self.read().latest().cloned()
    }

    /// Returns the last `count` elements (all of them if `None`), oldest first.
    pub fn history(&self, count: Option<usize>) -> Vec<Arc<T>> {
        let buffer = self.read();
        match count {
            Some(count) => buffer.iter_last(count).cloned().collect(),
            None => buffer.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.read().capacity()
    }
}

impl<T> Default for RollingBuffer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_CAPACITY)
    }
}
