//! Scheduler instance: lifecycle, pool binding, the stop/finish/exit
//! protocol, migration, and introspection.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, trace};

use crate::access::AccessMode;
use crate::error::{AbtError, AbtResult};
use crate::es::{ExecutionStreamContext, UltHandle};
use crate::pool::Pool;
use crate::predef::{BasicPolicy, Predef, PrioPolicy};
use crate::sched_def::{SchedConfig, SchedKind, SchedType, SchedulerPolicy};

/// A scheduler's run state: monotone, no reverse transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SchedState {
    Ready = 0,
    Running = 1,
    Stopping = 2,
    Terminated = 3,
}

impl SchedState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => SchedState::Ready,
            1 => SchedState::Running,
            2 => SchedState::Stopping,
            _ => SchedState::Terminated,
        }
    }
}

/// A scheduler's attachment state: mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Used {
    NotUsed = 0,
    Main = 1,
    InPool = 2,
}

impl Used {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Used::NotUsed,
            1 => Used::Main,
            _ => Used::InPool,
        }
    }
}

const REQ_FINISH: u8 = 0b01;
const REQ_EXIT: u8 = 0b10;

/// Constructs the default FIFO-ish pools `sched_create`/`sched_create_basic`
/// need when the caller passes the null-pool sentinel. A concrete pool
/// implementation is an external collaborator; `abt-pool::FifoPoolFactory`
/// is the reference implementation.
pub trait PoolFactory: Send + Sync {
    fn make_pool(&self, access: AccessMode, automatic: bool) -> Arc<dyn Pool>;
}

/// The "MPSC" default for null pool slots: private reader (single
/// consumer), shared writer (multiple producers).
pub const DEFAULT_POOL_ACCESS: AccessMode = AccessMode::PrSw;

/// A scheduler instance.
pub struct Scheduler {
    definition: Arc<dyn SchedulerPolicy>,
    kind: SchedKind,
    pools: Vec<Arc<dyn Pool>>,
    state: AtomicU8,
    request: AtomicU8,
    used: AtomicU8,
    automatic: bool,
    sched_type: SchedType,
    owning_thread: Mutex<Option<UltHandle>>,
    /// Structural lock: per-scheduler mutex, held during changes to pool
    /// bindings. Acquired only after any ES top_sched_mutex the caller
    /// already holds (lock order: ES mutex first).
    mutex: Mutex<()>,
    data: Mutex<Option<Box<dyn Any + Send>>>,
}

impl Scheduler {
    /// Construct a scheduler bound to the given pool slots.
    ///
    /// Pools already supplied by the caller are retained as-is; `None`
    /// slots get a freshly constructed, automatic default pool. If
    /// `definition.init` fails, every pool retained so far is released
    /// (and freed, if it was the last automatic binder) before the error
    /// is returned.
    pub fn create(
        definition: Arc<dyn SchedulerPolicy>,
        pool_slots: Vec<Option<Arc<dyn Pool>>>,
        config: &SchedConfig,
        factory: &dyn PoolFactory,
    ) -> AbtResult<Arc<Scheduler>> {
        let kind = definition.kind();
        let sched_type = definition.sched_type();
        let mut pools = Vec::with_capacity(pool_slots.len());
        for slot in pool_slots {
            let pool = slot.unwrap_or_else(|| factory.make_pool(DEFAULT_POOL_ACCESS, true));
            pool.retain();
            pools.push(pool);
        }

        let sched = Arc::new(Scheduler {
            definition: definition.clone(),
            kind,
            pools,
            state: AtomicU8::new(SchedState::Ready as u8),
            request: AtomicU8::new(0),
            used: AtomicU8::new(Used::NotUsed as u8),
            automatic: config.automatic,
            sched_type,
            owning_thread: Mutex::new(None),
            mutex: Mutex::new(()),
            data: Mutex::new(None),
        });

        if let Err(e) = definition.init(&sched, config) {
            debug!(kind = kind.0, "init failed, rolling back pool bindings");
            release_pools(&sched.pools);
            return Err(e);
        }

        info!(kind = kind.0, num_pools = sched.pools.len(), "scheduler created");
        Ok(sched)
    }

    /// Predef-driven convenience constructor. When `pools` is `None`,
    /// constructs `num_pools` fresh pools with `config.access`, each
    /// marked automatic.
    pub fn create_basic(
        predef: Predef,
        num_pools: usize,
        pools: Option<Vec<Arc<dyn Pool>>>,
        config: &SchedConfig,
        factory: &dyn PoolFactory,
    ) -> AbtResult<Arc<Scheduler>> {
        let definition: Arc<dyn SchedulerPolicy> = match predef {
            Predef::Basic | Predef::Default => Arc::new(BasicPolicy),
            Predef::Prio => Arc::new(PrioPolicy),
        };

        let slots: Vec<Option<Arc<dyn Pool>>> = match pools {
            Some(pools) => pools.into_iter().map(Some).collect(),
            None => (0..num_pools)
                .map(|_| Some(factory.make_pool(config.access, true)))
                .collect(),
        };

        Self::create(definition, slots, config, factory)
    }

    pub fn kind(&self) -> SchedKind {
        self.kind
    }

    pub fn sched_type(&self) -> SchedType {
        self.sched_type
    }

    pub fn state(&self) -> SchedState {
        SchedState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn used(&self) -> Used {
        Used::from_u8(self.used.load(Ordering::Acquire))
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }

    /// Advance `state` monotonically. No-op (returns `false`) if `next` is
    /// not strictly ahead of the current state.
    fn advance_state(&self, next: SchedState) -> bool {
        loop {
            let cur = self.state.load(Ordering::Acquire);
            if next as u8 <= cur {
                return false;
            }
            if self
                .state
                .compare_exchange(cur, next as u8, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return true;
            }
        }
    }

    pub fn mark_running(&self) {
        self.advance_state(SchedState::Running);
    }

    /// Atomically asserts `used == NotUsed` and sets it to `target`.
    pub fn associate(&self, target: Used) -> AbtResult<()> {
        self.used
            .compare_exchange(
                Used::NotUsed as u8,
                target as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|_| AbtError::Sched("scheduler already associated".into()))
    }

    /// Atomic OR of the FINISH request bit.
    pub fn finish(&self) {
        self.request.fetch_or(REQ_FINISH, Ordering::Release);
    }

    /// Atomic OR of the EXIT request bit.
    pub fn exit(&self) {
        self.request.fetch_or(REQ_EXIT, Ordering::Release);
    }

    fn total_size(&self) -> usize {
        self.pools.iter().map(|p| p.total_size()).sum()
    }

    /// Check and, if appropriate, act on the pending stop request. `es` is
    /// `None` when the calling OS thread is not attached to any execution
    /// stream (the caller is expected to have already performed the
    /// `local_get_xstream()` lookup; this core never touches
    /// platform-specific thread-locals itself).
    ///
    /// The ES top-scheduler mutex is always released before returning,
    /// even on the termination-commit path.
    pub fn has_to_stop(&self, es: Option<&dyn ExecutionStreamContext>) -> AbtResult<bool> {
        let es = es.ok_or(AbtError::InvalidXstream)?;
        let request = self.request.load(Ordering::Acquire);

        if request != 0 && self.advance_state(SchedState::Stopping) {
            trace!(kind = self.kind.0, "has_to_stop: STOPPING observed");
        }

        if request & REQ_EXIT != 0 {
            let _guard = es.top_sched_mutex().lock().unwrap();
            self.advance_state(SchedState::Terminated);
            trace!(kind = self.kind.0, "has_to_stop: EXIT committed");
            return Ok(true);
        }

        let drained = self.total_size() == 0;
        if drained && request & REQ_FINISH != 0 {
            let guard = es.top_sched_mutex().lock().unwrap();
            // Double-checked: a racing push/migration may have landed
            // between the first size check and taking the lock.
            if self.total_size() == 0 {
                self.advance_state(SchedState::Terminated);
                drop(guard);
                trace!(kind = self.kind.0, "has_to_stop: FINISH committed");
                return Ok(true);
            }
            drop(guard);
            return Ok(false);
        }

        if drained && request & REQ_FINISH == 0 {
            if let (Some(main), Some(me)) = (es.main_ult(), es.current_ult()) {
                es.context_switch(me, main);
            }
            return Ok(false);
        }

        Ok(false)
    }

    /// Resolve the target pool for a migration out of this scheduler. Held
    /// under the structural mutex so a concurrent pool rebind can't race
    /// the candidate-pool lookup and the accept check.
    pub fn get_migration_pool(&self, source_pool: &dyn Pool) -> AbtResult<Arc<dyn Pool>> {
        let _guard = self.mutex.lock().unwrap();

        if self.state() == SchedState::Terminated {
            return Err(AbtError::Sched("scheduler already terminated".into()));
        }
        let candidate = self
            .definition
            .get_migration_pool(self)
            .or_else(|| self.pools.first().cloned())
            .ok_or_else(|| AbtError::Sched("scheduler has no pools".into()))?;

        if candidate.accept_migration(source_pool) {
            Ok(candidate)
        } else {
            Err(AbtError::InvalidPoolAccess)
        }
    }

    pub fn get_num_pools(&self) -> usize {
        self.pools.len()
    }

    /// Copy up to `out.len()` pool handles starting at `idx`. Fails if
    /// `idx` is out of range.
    pub fn get_pools(&self, idx: usize, out: &mut [Option<Arc<dyn Pool>>]) -> AbtResult<usize> {
        if idx > self.pools.len() {
            return Err(AbtError::Sched("pool index out of range".into()));
        }
        let mut n = 0;
        for (slot, pool) in out.iter_mut().zip(self.pools[idx..].iter()) {
            *slot = Some(pool.clone());
            n += 1;
        }
        Ok(n)
    }

    pub fn pools(&self) -> &[Arc<dyn Pool>] {
        &self.pools
    }

    /// Sum of `pool.size()` across bound pools; excludes blocked/migrating
    /// units.
    pub fn get_size(&self) -> usize {
        self.pools.iter().map(|p| p.size()).sum()
    }

    /// Sum of `pool.total_size()`; always `>= get_size()`.
    pub fn get_total_size(&self) -> usize {
        self.total_size()
    }

    /// Opaque user data, set/read by the scheduler's own hooks only; no
    /// locking guarantee beyond interior-mutability safety.
    pub fn set_data(&self, data: Box<dyn Any + Send>) {
        *self.data.lock().unwrap() = Some(data);
    }

    pub fn with_data<R>(&self, f: impl FnOnce(Option<&(dyn Any + Send)>) -> R) -> R {
        let guard = self.data.lock().unwrap();
        f(guard.as_deref())
    }

    pub fn set_owning_thread(&self, ult: Option<UltHandle>) {
        *self.owning_thread.lock().unwrap() = ult;
    }

    pub fn owning_thread(&self) -> Option<UltHandle> {
        *self.owning_thread.lock().unwrap()
    }

    /// The per-scheduler structural mutex.
    pub fn structural_mutex(&self) -> &Mutex<()> {
        &self.mutex
    }

    pub fn definition(&self) -> &Arc<dyn SchedulerPolicy> {
        &self.definition
    }

    /// Releases user data via the definition's `free` hook, then releases
    /// every bound pool, destroying each automatic pool that reaches zero
    /// binders.
    pub fn free(sched: Arc<Scheduler>) {
        sched.definition.free(&sched);
        release_pools(&sched.pools);
        info!(kind = sched.kind.0, "scheduler freed");
    }
}

fn release_pools(pools: &[Arc<dyn Pool>]) {
    for pool in pools {
        let last = pool.release();
        if last && pool.automatic() {
            debug!("automatic pool destroyed with its last binding scheduler");
            // Dropping the last `Arc<dyn Pool>` clone here (plus whatever
            // the caller/factory held) frees it; the pool's own `Drop`
            // impl, if any, is where real teardown happens.
        }
    }
}

impl fmt::Display for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scheduler[{}] state={:?} used={:?} pools={} size={}/{}",
            self.kind.0,
            self.state(),
            self.used(),
            self.pools.len(),
            self.get_size(),
            self.get_total_size(),
        )
    }
}
