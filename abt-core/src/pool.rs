//! The Pool contract consumed by the scheduler core.
//!
//! Concrete pools (FIFO, priority lanes) are an external collaborator;
//! `abt-pool` supplies the reference implementations. This module only
//! defines the trait and the opaque work-unit type the core pushes/pops.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::access::AccessMode;
use crate::scheduler::Scheduler;

static NEXT_WORK_UNIT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity for a work unit, assigned once at creation. Not part of the
/// contract itself, but useful for introspection/logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkUnitId(u64);

impl WorkUnitId {
    pub fn new() -> Self {
        Self(NEXT_WORK_UNIT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for WorkUnitId {
    fn default() -> Self {
        Self::new()
    }
}

/// A unit of work held by a pool. ULT/task stack state is explicitly out of
/// scope for this core; a unit is either a run-to-completion closure, or a
/// scheduler being migrated/pushed as a work item of someone else's pool
/// (`used = IN_POOL`).
pub enum WorkUnit {
    /// A run-to-completion task: no private stack.
    Task(WorkUnitId, Box<dyn FnOnce() + Send>),
    /// A user-level thread body. The core treats its execution identically
    /// to a task (context switching is an opaque external primitive); the
    /// distinction matters only for `SchedType` dispatch checks.
    Ult(WorkUnitId, Box<dyn FnOnce() + Send>),
    /// A scheduler instance pushed into another scheduler's pool as a work
    /// unit.
    Scheduler(Arc<Scheduler>),
}

impl WorkUnit {
    pub fn id(&self) -> Option<WorkUnitId> {
        match self {
            WorkUnit::Task(id, _) | WorkUnit::Ult(id, _) => Some(*id),
            WorkUnit::Scheduler(_) => None,
        }
    }
}

impl fmt::Debug for WorkUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkUnit::Task(id, _) => f.debug_tuple("Task").field(id).finish(),
            WorkUnit::Ult(id, _) => f.debug_tuple("Ult").field(id).finish(),
            WorkUnit::Scheduler(s) => f.debug_tuple("Scheduler").field(&s.kind()).finish(),
        }
    }
}

/// The contract a pool implementation must satisfy.
pub trait Pool: Send + Sync {
    /// Push a work unit. Implementations must honor their own
    /// `access_mode`; the core validates cross-ES/cross-scheduler access
    /// before calling this (see `crate::access`).
    fn push(&self, unit: WorkUnit);

    /// Pop a work unit in this pool's own order, or `None` if empty.
    fn pop(&self) -> Option<WorkUnit>;

    /// Count of immediately poppable units.
    fn size(&self) -> usize;

    /// Count of all units, including blocked/migrating ones not currently
    /// poppable. Always `>= size()`.
    fn total_size(&self) -> usize;

    /// This pool's immutable access mode.
    fn access_mode(&self) -> AccessMode;

    /// Whether `source`'s units may migrate into this pool, per the
    /// access-mode matrix.
    fn accept_migration(&self, source: &dyn Pool) -> bool;

    /// Increment the binding-scheduler count.
    fn retain(&self);

    /// Decrement the binding-scheduler count. Returns `true` if this was
    /// the last binder (`num_scheds` reached zero).
    fn release(&self) -> bool;

    /// Whether this pool is destroyed along with its last binding
    /// scheduler.
    fn automatic(&self) -> bool;

    /// Number of schedulers currently bound to this pool.
    fn num_scheds(&self) -> usize;
}
