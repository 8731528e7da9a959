//! # RAII Spin Lock Guard
//!
//! In this exercise, you will implement an RAII guard for a spin lock, causing the lock to be automatically released when leaving scope.
//! This is a classic application of Rust's ownership system in systems programming.
//!
//! ## Key Points
//! - RAII (Resource Acquisition Is Initialization) pattern
//! - `Deref` / `DerefMut` traits for transparent access
//! - `Drop` trait for automatic release
//! - Why manual lock/unlock is unsafe (forgetting unlock, panic without release)

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct SpinLock<T> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Sync for SpinLock<T> {}
unsafe impl<T: Send> Send for SpinLock<T> {}

/// Spin lock guard: RAII handle holding the lock.
/// Automatically releases the lock when SpinGuard is dropped.
pub struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> SpinLock<T> {
    pub fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquire lock, returning SpinGuard.
    ///
    /// TODO: Spin-wait to acquire lock (compare_exchange), return SpinGuard on success.
    pub fn lock(&self) -> SpinGuard<'_, T> {
        // TODO: Spin-wait to acquire lock
        // TODO: Return SpinGuard { lock: self }
        todo!()
    }
}

// TODO: Implement Deref trait for SpinGuard
// Return &T, obtained via self.lock.data.get()
impl<T> Deref for SpinGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        todo!()
    }
}

// TODO: Implement DerefMut trait for SpinGuard
// Return &mut T
impl<T> DerefMut for SpinGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        todo!()
    }
}

// TODO: Implement Drop trait for SpinGuard
// Set lock.locked to false (Release ordering)
impl<T> Drop for SpinGuard<'_, T> {
    fn drop(&mut self) {
        todo!()
    }
}
