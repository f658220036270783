//! Bounded replay buffer.

use std::collections::VecDeque;

use super::Frame;

/// Maximum number of retained history entries.
pub const HISTORY_CAPACITY: usize = 250;

/// Append-only log of broadcast frames with FIFO eviction.
///
/// Text and binary entries share one sequence ordered by arrival and count
/// against the same cap.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    entries: VecDeque<Frame>,
    capacity: usize,
}

impl HistoryBuffer {
    /// Create an empty buffer holding at most [`HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// Create an empty buffer with a custom cap.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(HISTORY_CAPACITY)),
            capacity,
        }
    }

    /// Push an entry to the tail, evicting from the head while over capacity.
    ///
    /// Returns the number of evicted entries.
    pub fn append(&mut self, entry: Frame) -> usize {
        self.entries.push_back(entry);
        let mut evicted = 0;
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// All entries in arrival order.
    pub fn replay(&self) -> Vec<Frame> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
