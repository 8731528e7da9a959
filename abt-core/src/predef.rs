//! Built-in scheduling policies ("Predef").
//!
//! `BasicPolicy` is a single-pool round-robin FIFO drain. `PrioPolicy` is
//! a strict-priority multi-level policy, a supplemental addition beyond
//! the two originally named predefs.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, trace};

use crate::error::AbtResult;
use crate::es::ExecutionStreamContext;
use crate::pool::Pool;
use crate::sched_def::{SchedConfig, SchedKind, SchedType, SchedulerPolicy};
use crate::scheduler::Scheduler;

/// Number of priority lanes `create_basic(Predef::Prio, ...)` expects to be
/// given one pool each for.
pub const PRIO_LEVELS: usize = 4;

/// Which built-in policy `sched_create_basic` should instantiate.
/// `Default` is an alias for `Basic`: both get a single pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predef {
    Basic,
    Default,
    Prio,
}

/// Backs off briefly between empty-pool polls so `run` doesn't spin a CPU
/// core at 100% while waiting for work, the same concern behind
/// `core::hint::spin_loop` in a tight spinlock -- here relaxed to a short
/// sleep since a dispatch loop, unlike a lock acquisition, is not expected
/// to resolve within nanoseconds.
const IDLE_BACKOFF: Duration = Duration::from_micros(50);

/// Dispatch a popped work unit. `sched_type` gates `WorkUnit::Ult`: a
/// task-only scheduler never runs a ULT-bodied unit, checked here rather
/// than at construction time.
fn dispatch(unit: crate::pool::WorkUnit, es: &dyn ExecutionStreamContext, sched_type: SchedType) {
    match unit {
        crate::pool::WorkUnit::Task(_, job) => job(),
        crate::pool::WorkUnit::Ult(id, job) => {
            if sched_type == SchedType::TaskOnly {
                error!(?id, "dropping ULT dispatched to a task-only scheduler");
                return;
            }
            job()
        }
        crate::pool::WorkUnit::Scheduler(inner) => es.run_nested(inner),
    }
}

/// Round-robin single-FIFO-pool policy.
pub struct BasicPolicy;

impl SchedulerPolicy for BasicPolicy {
    fn init(&self, _sched: &Scheduler, _config: &SchedConfig) -> AbtResult<()> {
        Ok(())
    }

    fn run(&self, sched: &Scheduler, es: &dyn ExecutionStreamContext) {
        sched.mark_running();
        loop {
            let mut dispatched = false;
            for pool in sched.pools() {
                if let Some(unit) = pool.pop() {
                    dispatch(unit, es, sched.sched_type());
                    dispatched = true;
                }
            }
            match sched.has_to_stop(Some(es)) {
                Ok(true) => break,
                Ok(false) => {
                    if !dispatched {
                        std::thread::sleep(IDLE_BACKOFF);
                    }
                }
                Err(e) => {
                    trace!(error = %e, "has_to_stop failed, stopping run loop");
                    break;
                }
            }
        }
    }

    fn free(&self, _sched: &Scheduler) {}

    fn sched_type(&self) -> SchedType {
        SchedType::UltCapable
    }

    fn kind(&self) -> SchedKind {
        SchedKind("basic")
    }
}

/// Strict-priority policy: drains pool 0 (highest priority) to empty
/// before considering pool 1, and so on.
pub struct PrioPolicy;

impl SchedulerPolicy for PrioPolicy {
    fn init(&self, _sched: &Scheduler, _config: &SchedConfig) -> AbtResult<()> {
        Ok(())
    }

    fn run(&self, sched: &Scheduler, es: &dyn ExecutionStreamContext) {
        sched.mark_running();
        loop {
            let mut dispatched = false;
            for pool in sched.pools() {
                if let Some(unit) = pool.pop() {
                    dispatch(unit, es, sched.sched_type());
                    dispatched = true;
                    break; // re-check from the highest-priority pool
                }
            }
            match sched.has_to_stop(Some(es)) {
                Ok(true) => break,
                Ok(false) => {
                    if !dispatched {
                        std::thread::sleep(IDLE_BACKOFF);
                    }
                }
                Err(e) => {
                    trace!(error = %e, "has_to_stop failed, stopping run loop");
                    break;
                }
            }
        }
    }

    fn free(&self, _sched: &Scheduler) {}

    /// The highest-priority pool is the natural migration target.
    fn get_migration_pool(&self, sched: &Scheduler) -> Option<Arc<dyn Pool>> {
        sched.pools().first().cloned()
    }

    fn sched_type(&self) -> SchedType {
        SchedType::UltCapable
    }

    fn kind(&self) -> SchedKind {
        SchedKind("prio")
    }
}
