use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use abt_core::access::accept_push_from_other_es;
use abt_core::scheduler::PoolFactory;
use abt_core::{AccessMode, Pool, WorkUnit};
use tracing::trace;

/// A mutex-protected FIFO queue. `blocked` counts units that have been
/// popped out for migration but not yet landed in a target pool, so
/// `total_size` can exceed `size` while a migration is in flight.
pub struct FifoPool {
    access: AccessMode,
    automatic: bool,
    queue: Mutex<VecDeque<WorkUnit>>,
    blocked: AtomicUsize,
    num_scheds: AtomicUsize,
}

impl FifoPool {
    pub fn new(access: AccessMode, automatic: bool) -> Self {
        Self {
            access,
            automatic,
            queue: Mutex::new(VecDeque::new()),
            blocked: AtomicUsize::new(0),
            num_scheds: AtomicUsize::new(0),
        }
    }

    /// Mark `n` units as in-flight for migration: still counted by
    /// `total_size`, no longer poppable.
    pub fn mark_blocked(&self, n: usize) {
        self.blocked.fetch_add(n, Ordering::AcqRel);
    }

    pub fn clear_blocked(&self, n: usize) {
        self.blocked.fetch_sub(n, Ordering::AcqRel);
    }
}

impl Pool for FifoPool {
    fn push(&self, unit: WorkUnit) {
        self.queue.lock().unwrap().push_back(unit);
    }

    fn pop(&self) -> Option<WorkUnit> {
        self.queue.lock().unwrap().pop_front()
    }

    fn size(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    fn total_size(&self) -> usize {
        self.size() + self.blocked.load(Ordering::Acquire)
    }

    fn access_mode(&self) -> AccessMode {
        self.access
    }

    fn accept_migration(&self, source: &dyn Pool) -> bool {
        // Migration lands a unit popped from `source` into `self`
        //: treated as "push work into this pool
        // from another ES," non-recursive case.
        let _ = source.access_mode();
        let accepted = accept_push_from_other_es(self.access, false);
        trace!(access = ?self.access, accepted, "accept_migration");
        accepted
    }

    fn retain(&self) {
        self.num_scheds.fetch_add(1, Ordering::AcqRel);
    }

    fn release(&self) -> bool {
        self.num_scheds.fetch_sub(1, Ordering::AcqRel) == 1
    }

    fn automatic(&self) -> bool {
        self.automatic
    }

    fn num_scheds(&self) -> usize {
        self.num_scheds.load(Ordering::Acquire)
    }
}

/// Default `PoolFactory`: every constructed pool is a `FifoPool`.
pub struct FifoPoolFactory;

impl PoolFactory for FifoPoolFactory {
    fn make_pool(&self, access: AccessMode, automatic: bool) -> std::sync::Arc<dyn Pool> {
        std::sync::Arc::new(FifoPool::new(access, automatic))
    }
}
