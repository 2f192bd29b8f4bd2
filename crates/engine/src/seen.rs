//! Seen-set — remembers which signal ids have already been dispatched.
//!
//! The in-memory implementation is process-lifetime only: it starts empty,
//! only ever grows, and is lost on restart. That means every qualifying row is
//! re-notified once after a restart.

use std::collections::HashSet;

/// Storage for ids that have already been dispatched.
pub trait SeenStore {
    /// Whether `id` has been marked seen.
    fn contains(&self, id: i64) -> bool;

    /// Mark `id` seen. Returns `true` if it was not seen before.
    fn mark_seen(&mut self, id: i64) -> bool;

    /// Number of ids marked seen so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory seen-set backed by a `HashSet`.
#[derive(Debug, Default)]
pub struct InMemorySeenSet {
    ids: HashSet<i64>,
}

impl InMemorySeenSet {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeenStore for InMemorySeenSet {
    fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    fn mark_seen(&mut self, id: i64) -> bool {
        self.ids.insert(id)
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}
