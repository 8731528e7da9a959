//! Reference pool implementations satisfying the `abt_core::Pool` contract.
//!
//! Concrete pools are an external collaborator for the scheduler core; this
//! crate supplies the minimal FIFO pool the BASIC and PRIO predefs need to
//! be runnable end-to-end: a mutex-protected queue with a separate count
//! of blocked/migrating units, so `total_size` can exceed the number of
//! immediately poppable units.

mod fifo;

pub use fifo::{FifoPool, FifoPoolFactory};
