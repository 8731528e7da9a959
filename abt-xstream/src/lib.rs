//! A minimal, OS-thread-backed execution stream implementing the
//! `abt_core::es::ExecutionStreamContext` contract.
//!
//! The ES is explicitly an external collaborator for the scheduler core:
//! one OS thread hosts a stack of scheduler instances and drives the
//! topmost one's `run` hook. This crate does not implement real
//! stack-switching assembly -- `context_switch` is a cooperative,
//! park/unpark-style handoff on the ES's own condvar, consistent with
//! treating it as an opaque primitive.

mod xstream;

pub use xstream::{local_get_xstream, spawn, Xstream, XstreamId};
