use std::collections::VecDeque;

/// Bounded FIFO buffer holding at most `capacity` elements.
/// When a new element is pushed into a full buffer, the oldest element is popped out.
#[derive(Clone, Debug)]
pub struct CircularBuffer<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    /// Creates an empty CircularBuffer able to hold `capacity` elements.
    /// A zero capacity is raised to one so the buffer can always hold the latest element.
    pub fn new(capacity: usize) -> Self {
        if capacity == 0 {
            log::warn!("CircularBuffer capacity must be positive, using 1");
        }
        let capacity = capacity.max(1);
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// New element `elem` is pushed. Returns the evicted element if the buffer was full.
    pub fn push(&mut self, elem: T) -> Option<T> {
        let evicted = if self.buffer.len() == self.capacity {
            self.buffer.pop_front()
        } else {
            None
        };
        self.buffer.push_back(elem);
        evicted
    }

    /// Most recently pushed element
    pub fn latest(&self) -> Option<&T> {
        self.buffer.back()
    }

    /// Iterates from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Iterates the newest `count` elements, oldest first.
    pub fn iter_last(&self, count: usize) -> impl Iterator<Item = &T> {
        let skip = self.buffer.len().saturating_sub(count);
        self.buffer.iter().skip(skip)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> CircularBuffer<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.buffer.iter().cloned().collect()
    }
}
