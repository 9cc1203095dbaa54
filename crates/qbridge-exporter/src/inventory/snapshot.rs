use std::sync::{Arc, Mutex, MutexGuard};
use std::time::SystemTime;

use qbridge_core::queue::QueueRecord;

/// Immutable, fully populated view of discovered queues.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    queues: Vec<QueueRecord>,
    refreshed_at: Option<SystemTime>,
}

impl Snapshot {
    pub fn new(queues: Vec<QueueRecord>) -> Self {
        Self {
            queues,
            refreshed_at: Some(SystemTime::now()),
        }
    }

    /// Queues in upstream listing order.
    pub fn queues(&self) -> &[QueueRecord] {
        &self.queues
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// `None` until a discovery has been published.
    pub fn refreshed_at(&self) -> Option<SystemTime> {
        self.refreshed_at
    }
}

/// Holder of the current snapshot.
///
/// The lock only guards the `Arc` swap; readers clone the `Arc` and release
/// the lock before doing any network work.
#[derive(Debug, Default)]
pub struct SnapshotCell {
    current: Mutex<Arc<Snapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Arc<Snapshot>> {
        // A poisoned lock still holds a whole Arc; nothing is half-written.
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Snapshot> {
        Arc::clone(&self.guard())
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn publish(&self, next: Snapshot) -> Arc<Snapshot> {
        let next = Arc::new(next);
        std::mem::replace(&mut *self.guard(), next)
    }
}
