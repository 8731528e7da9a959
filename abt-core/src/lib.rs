//! Scheduler core for a lightweight user-level threading runtime.
//!
//! Binds runnable work units to execution streams and pumps them through
//! user-supplied scheduling policies. This crate owns the scheduler object
//! model, scheduler-pool binding/refcounting, the stop/finish/exit
//! protocol, migration, and introspection. Concrete
//! pools, execution streams, and the ULT/task context-switching primitive
//! are external collaborators supplied by `abt-pool`
//! and `abt-xstream`.

pub mod access;
pub mod error;
pub mod es;
pub mod pool;
pub mod predef;
pub mod sched_def;
pub mod scheduler;

pub use access::AccessMode;
pub use error::{AbtError, AbtResult};
pub use es::{ExecutionStreamContext, UltHandle};
pub use pool::{Pool, WorkUnit, WorkUnitId};
pub use predef::{Predef, PRIO_LEVELS};
pub use sched_def::{SchedConfig, SchedKind, SchedType, SchedulerPolicy};
pub use scheduler::{PoolFactory, SchedState, Scheduler, Used, DEFAULT_POOL_ACCESS};
