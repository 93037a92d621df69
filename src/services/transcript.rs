//! Command transcript
//!
//! A bounded, insertion-ordered history of result envelopes. Appends past the
//! capacity evict the oldest entries first. The lock only ever covers the
//! in-memory mutation or copy, never process execution or decoding.

use crate::models::CommandResult;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Default number of envelopes retained
pub const DEFAULT_TRANSCRIPT_CAPACITY: usize = 200;

/// Thread-safe transcript handle
///
/// Cloning the handle shares the same buffer. Use [`Transcript::new`] for an
/// isolated instance.
#[derive(Debug, Clone)]
pub struct Transcript {
    inner: Arc<Mutex<VecDeque<CommandResult>>>,
    capacity: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRANSCRIPT_CAPACITY)
    }

    /// A capacity of zero is treated as one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<CommandResult>> {
        // A panic while holding the lock cannot leave the deque half-mutated
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an envelope at the end, evicting from the front past capacity
    pub fn append(&self, result: CommandResult) {
        let mut entries = self.lock();
        entries.push_back(result);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    /// Independent copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<CommandResult> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
