use std::sync::Arc;

use abt_core::sched_def::SchedConfig;
use abt_core::{AbtError, AccessMode, Predef, Scheduler};
use abt_pool::{FifoPool, FifoPoolFactory};
use abt_xstream::Xstream;

fn xstream_with_main_pool_access(access: AccessMode) -> Arc<Xstream> {
    let pool: Arc<dyn abt_core::Pool> = Arc::new(FifoPool::new(access, true));
    let config = SchedConfig {
        access,
        automatic: true,
        extra: None,
    };
    let sched = Scheduler::create_basic(
        Predef::Basic,
        1,
        Some(vec![pool]),
        &config,
        &FifoPoolFactory,
    )
    .unwrap();
    let es = Xstream::new();
    es.set_main_scheduler(sched).unwrap();
    es
}

fn other_es_scheduler() -> Arc<Scheduler> {
    Scheduler::create_basic(
        Predef::Basic,
        1,
        None,
        &SchedConfig::default(),
        &FifoPoolFactory,
    )
    .unwrap()
}

#[test]
fn rejects_cross_es_bind_into_private_reader_pool() {
    let es = xstream_with_main_pool_access(AccessMode::Prw);
    let incoming = other_es_scheduler();
    let result = es.push_scheduler_from_other_es(incoming);
    assert!(matches!(result, Err(AbtError::InvalidPoolAccess)));
}

#[test]
fn accepts_cross_es_bind_into_shared_reader_pool() {
    let es = xstream_with_main_pool_access(AccessMode::SrSw);
    let incoming = other_es_scheduler();
    es.push_scheduler_from_other_es(incoming)
        .expect("shared-reader main pool must accept a cross-ES bind");
}
