//! # Atomic Operations Basics
//!
//! In this exercise, you will use atomic types to implement a lock-free thread‑safe counter.
//!
//! ## Key Concepts
//! - `std::sync::atomic::AtomicU64`
//! - `fetch_add`, `fetch_sub`, `load`, `store` operations
//! - `compare_exchange` lock‑free primitive
//! - `Ordering` memory ordering

use std::sync::atomic::{AtomicU64, Ordering};

pub struct AtomicCounter {
    value: AtomicU64,
}

impl AtomicCounter {
    pub const fn new(init: u64) -> Self {
        Self {
            value: AtomicU64::new(init),
        }
    }

    /// Atomically increments by 1, returns the value **before** increment.
    ///
    /// Hint: use `fetch_add` with `Ordering::Relaxed`
    pub fn increment(&self) -> u64 {
        // TODO
        todo!()
    }

    /// Atomically decrements by 1, returns the value **before** decrement.
    pub fn decrement(&self) -> u64 {
        // TODO
        todo!()
    }

    /// Gets the current value.
    pub fn get(&self) -> u64 {
        // TODO
        todo!()
    }

    /// Atomic CAS (Compare-And-Swap) operation.
    /// If current value equals `expected`, set to `new_val` and return Ok(expected).
    /// Otherwise return Err(actual current value).
    ///
    /// Hint: use `compare_exchange` with success ordering `Ordering::AcqRel` and failure ordering `Ordering::Acquire`
    pub fn compare_and_swap(&self, expected: u64, new_val: u64) -> Result<u64, u64> {
        // TODO
        todo!()
    }

    /// Multiply the value atomically using a CAS loop.
    /// Returns the value **before** multiplication.
    ///
    /// Hint: read current value in loop, compute new value, try CAS to update, retry on failure.
    pub fn fetch_multiply(&self, multiplier: u64) -> u64 {
        // TODO: CAS loop
        // loop {
        //     let current = ...
        //     let new = current * multiplier;
        //     match self.compare_and_swap(current, new) { ... }
        // }
        todo!()
    }
}
