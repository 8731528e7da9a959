use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;

use abt_core::access::accept_bind_other_es;
use abt_core::es::ExecutionStreamContext;
use abt_core::{AbtError, AbtResult, Pool, Scheduler, Used, UltHandle, WorkUnit};
use tracing::{debug, info, trace};

static NEXT_XSTREAM_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XstreamId(u64);

thread_local! {
    static CURRENT: RefCell<Option<Arc<Xstream>>> = const { RefCell::new(None) };
}

/// `local_get_xstream()`: `None` means the calling OS
/// thread is not attached to any execution stream.
pub fn local_get_xstream() -> Option<Arc<Xstream>> {
    CURRENT.with(|c| c.borrow().clone())
}

fn set_current(es: Option<Arc<Xstream>>) {
    CURRENT.with(|c| *c.borrow_mut() = es);
}

/// One OS thread hosting a stack of scheduler instances.
pub struct Xstream {
    id: XstreamId,
    top_sched_mutex: Mutex<()>,
    main_ult: UltHandle,
    current: Mutex<Option<UltHandle>>,
    parked: Mutex<bool>,
    cv: Condvar,
    stack: Mutex<Vec<Arc<Scheduler>>>,
}

impl Xstream {
    pub fn new() -> Arc<Self> {
        let main_ult = UltHandle::new();
        Arc::new(Xstream {
            id: XstreamId(NEXT_XSTREAM_ID.fetch_add(1, Ordering::Relaxed)),
            top_sched_mutex: Mutex::new(()),
            main_ult,
            current: Mutex::new(Some(main_ult)),
            parked: Mutex::new(false),
            cv: Condvar::new(),
            stack: Mutex::new(Vec::new()),
        })
    }

    pub fn id(&self) -> XstreamId {
        self.id
    }

    /// Make `sched` this ES's top scheduler (`used = Main`).
    pub fn set_main_scheduler(self: &Arc<Self>, sched: Arc<Scheduler>) -> abt_core::AbtResult<()> {
        sched.associate(Used::Main)?;
        self.stack.lock().unwrap().push(sched);
        Ok(())
    }

    /// Bind `sched` into this ES's main scheduler's first pool, called from
    /// a thread other than the one driving this ES (the cross-ES bind:
    /// "push a scheduler-as-work-unit into another ES's main pool"). Only
    /// a pool whose access mode admits a shared reader accepts this --
    /// checked before `sched` is touched, so a rejected bind leaves it
    /// unassociated and returns `InvalidPoolAccess`.
    pub fn push_scheduler_from_other_es(&self, sched: Arc<Scheduler>) -> AbtResult<()> {
        let main = self
            .stack
            .lock()
            .unwrap()
            .first()
            .cloned()
            .ok_or(AbtError::InvalidXstream)?;
        let pool = main
            .pools()
            .first()
            .cloned()
            .ok_or(AbtError::InvalidXstream)?;

        let accepted = accept_bind_other_es(pool.access_mode());
        trace!(xstream = self.id.0, accepted, "push_scheduler_from_other_es");
        if !accepted {
            return Err(AbtError::InvalidPoolAccess);
        }

        sched.associate(Used::InPool)?;
        pool.push(WorkUnit::Scheduler(sched));
        Ok(())
    }

    /// Whether the ES's dispatch loop is currently parked waiting to be
    /// resumed (it switched back to the main ULT with nothing left to
    /// do and FINISH not set).
    pub fn is_parked(&self) -> bool {
        *self.parked.lock().unwrap()
    }

    /// Wake a parked ES: new work has arrived.
    pub fn resume(&self) {
        let mut parked = self.parked.lock().unwrap();
        if *parked {
            *parked = false;
            self.cv.notify_all();
        }
    }

    /// Drive the topmost scheduler until its stack empties (every
    /// scheduler has reached `Terminated`) or the ES parks waiting to be
    /// resumed. Intended to run on the thread returned by `spawn`.
    pub fn run(self: &Arc<Self>) {
        set_current(Some(self.clone()));
        loop {
            let top = self.stack.lock().unwrap().last().cloned();
            let Some(sched) = top else { break };
            // `run` only returns once `has_to_stop` has reported `true`
            // (state committed to `Terminated`); any park-on-main-ULT
            // handoff happens *inside* that call, on `context_switch`, and
            // is resolved before `run` ever returns.
            sched
                .definition()
                .clone()
                .run(&sched, self.as_ref() as &dyn ExecutionStreamContext);
            self.stack.lock().unwrap().pop();
        }
        set_current(None);
    }
}

impl ExecutionStreamContext for Xstream {
    fn top_sched_mutex(&self) -> &Mutex<()> {
        &self.top_sched_mutex
    }

    fn main_ult(&self) -> Option<UltHandle> {
        Some(self.main_ult)
    }

    fn current_ult(&self) -> Option<UltHandle> {
        *self.current.lock().unwrap()
    }

    fn context_switch(&self, from: UltHandle, to: UltHandle) {
        debug!(xstream = self.id.0, ?from, ?to, "context_switch");
        *self.current.lock().unwrap() = Some(to);
        if Some(to) == self.main_ult() {
            let mut parked = self.parked.lock().unwrap();
            *parked = true;
            self.cv.notify_all();
            while *parked {
                parked = self.cv.wait(parked).unwrap();
            }
            *self.current.lock().unwrap() = Some(from);
        }
    }

    fn run_nested(&self, sched: Arc<Scheduler>) {
        // `sched` was popped as a work unit from the current scheduler's
        // pool (`used = InPool`). It becomes this ES's
        // new top scheduler; `Xstream::run`'s own loop drives it once the
        // currently-executing policy's `run` call returns (when the
        // current scheduler pauses on its main-ULT handoff or terminates).
        self.stack.lock().unwrap().push(sched);
    }
}

/// Spawn a new OS thread hosting `sched` as its main scheduler, and start
/// driving it immediately.
pub fn spawn(sched: Arc<Scheduler>) -> abt_core::AbtResult<(Arc<Xstream>, JoinHandle<()>)> {
    let es = Xstream::new();
    es.set_main_scheduler(sched)?;
    let es_for_thread = es.clone();
    let handle = std::thread::Builder::new()
        .name(format!("abt-es-{}", es.id().0))
        .spawn(move || {
            info!(xstream = es_for_thread.id().0, "execution stream started");
            es_for_thread.run();
            info!(xstream = es_for_thread.id().0, "execution stream drained");
        })
        .expect("failed to spawn execution stream thread");
    Ok((es, handle))
}
