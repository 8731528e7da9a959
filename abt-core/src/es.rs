//! The execution-stream contract consumed by the scheduler core. The ES
//! itself is an external collaborator, out of scope for this crate;
//! `abt-xstream` supplies a concrete, OS-thread-backed implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::scheduler::Scheduler;

static NEXT_ULT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity for a user-level thread. Stack/context state is out of
/// scope for this core; the handle exists only so the ES contract can name
/// "the caller" and "the main ULT".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UltHandle(u64);

impl UltHandle {
    pub fn new() -> Self {
        Self(NEXT_ULT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for UltHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// What the core needs from an execution stream: the top-scheduler mutex,
/// the main ULT to switch back to when a primary ES drains with nothing
/// left to do and no FINISH request pending, and the opaque context-switch
/// primitive.
pub trait ExecutionStreamContext: Send + Sync {
    /// The ES's top-scheduler mutex. Held across termination commit and
    /// across migrations that would change the top scheduler; acquired
    /// before any per-scheduler mutex (lock order: ES mutex first).
    fn top_sched_mutex(&self) -> &Mutex<()>;

    /// The ES's originally-entered user context, if any.
    fn main_ult(&self) -> Option<UltHandle>;

    /// The ULT currently executing on this ES, if the caller is a ULT
    /// (vs. a task, or an external OS thread not currently running
    /// cooperative work).
    fn current_ult(&self) -> Option<UltHandle>;

    /// Cooperatively hand control from `from` to `to`. An opaque
    /// primitive; this core never inspects stack state.
    fn context_switch(&self, from: UltHandle, to: UltHandle);

    /// Push `sched` onto this ES's scheduler stack as the new top
    /// scheduler. Invoked by a policy's `run` loop when it pops a
    /// `WorkUnit::Scheduler` -- only the ES owns the stack of schedulers,
    /// so the core hands the work back to it rather than dispatching the
    /// nested scheduler itself.
    fn run_nested(&self, sched: Arc<Scheduler>);
}
