use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::VecDeque;

/// Fixed-capacity, newest-first buffer. Pushing past capacity evicts the
/// oldest element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from newest-first items, dropping anything past capacity.
    pub fn from_newest_first(items: impl IntoIterator<Item = T>, capacity: usize) -> Self {
        let mut ring = Self::with_capacity(capacity);
        ring.items.extend(items.into_iter().take(capacity));
        ring
    }

    /// Insert at the front; returns the evicted oldest element, if any.
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.capacity == 0 {
            return Some(item);
        }
        self.items.push_front(item);
        if self.items.len() > self.capacity {
            self.items.pop_back()
        } else {
            None
        }
    }

    pub fn newest(&self) -> Option<&T> {
        self.items.front()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.items.retain(keep);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// Deserialized as a plain array; callers re-cap with [`RingBuffer::from_newest_first`].
impl<'de, T: Deserialize<'de>> Deserialize<'de> for RingBuffer<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        let capacity = items.len();
        Ok(Self::from_newest_first(items, capacity))
    }
}
