//! The Scheduler Definition: an immutable vtable of hooks. Realized as a
//! trait object rather than raw function pointers or pointer-identity
//! comparison.

use std::sync::Arc;

use crate::error::AbtResult;
use crate::es::ExecutionStreamContext;
use crate::pool::Pool;
use crate::scheduler::Scheduler;

/// Whether a scheduler may run ULTs (with a private stack) or only
/// run-to-completion tasks. Checked at dispatch time only, not at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedType {
    UltCapable,
    TaskOnly,
}

/// A stable identifier for a scheduler definition, used for equality and
/// "is this the built-in BASIC?" checks -- a `&'static str` name rather
/// than a raw pointer, so equality isn't tied to pointer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchedKind(pub &'static str);

/// Free-form configuration passed to `init`. `access`/`automatic` drive
/// default-pool construction in `sched_create`/`sched_create_basic`;
/// `extra` is opaque, user-defined-scheduler configuration.
#[derive(Debug, Clone)]
pub struct SchedConfig {
    pub access: crate::access::AccessMode,
    pub automatic: bool,
    pub extra: Option<serde_json::Value>,
}

impl Default for SchedConfig {
    fn default() -> Self {
        Self {
            access: crate::access::AccessMode::Prw,
            automatic: true,
            extra: None,
        }
    }
}

/// The four-hook vtable a scheduling policy implements.
pub trait SchedulerPolicy: Send + Sync {
    /// Populate user data; may call `Scheduler::set_data`. Invoked last
    /// during construction, after every other field is populated.
    fn init(&self, sched: &Scheduler, config: &SchedConfig) -> AbtResult<()>;

    /// Loop: pick a pool, pop a unit, dispatch it; periodically call
    /// `Scheduler::has_to_stop`. Returns once that reports `true`. `es` is
    /// the execution stream driving this scheduler, threaded through so
    /// `has_to_stop` can reach the top-scheduler mutex and main ULT.
    fn run(&self, sched: &Scheduler, es: &dyn ExecutionStreamContext);

    /// Release user data. Called by `sched_free` before the core tears
    /// the scheduler down.
    fn free(&self, sched: &Scheduler);

    /// Candidate target pool for a migration out of `sched`. `None` means
    /// "use the default: first pool".
    fn get_migration_pool(&self, _sched: &Scheduler) -> Option<Arc<dyn Pool>> {
        None
    }

    fn sched_type(&self) -> SchedType;

    fn kind(&self) -> SchedKind;
}
