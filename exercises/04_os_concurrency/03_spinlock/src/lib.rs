//! # 自旋锁
//!
//! 本练习中，你需要实现一个基本的自旋锁（Spin Lock）。
//! 自旋锁是 OS 内核中最基础的同步原语之一。
//!
//! ## 知识点
//! - 自旋锁使用忙等待（busy-waiting）获取锁
//! - `AtomicBool` 的 `compare_exchange` 实现锁获取
//! - `core::hint::spin_loop` 降低 CPU 功耗
//! - `UnsafeCell` 提供内部可变性

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// 基本自旋锁
pub struct SpinLock<T> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

unsafe impl<T: Send> Sync for SpinLock<T> {}
unsafe impl<T: Send> Send for SpinLock<T> {}

impl<T> SpinLock<T> {
    pub fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    /// 获取锁，返回内部数据的可变引用。
    ///
    /// TODO: 使用 compare_exchange 自旋直到获取锁
    /// 1. 在循环中尝试将 locked 从 false 设为 true
    /// 2. 成功使用 Acquire ordering，失败使用 Relaxed
    /// 3. 失败时调用 `core::hint::spin_loop()` 提示 CPU
    /// 4. 成功后返回 `&mut *self.data.get()`
    ///
    /// # Safety
    /// 调用者必须保证在使用完数据后调用 `unlock`。
    pub fn lock(&self) -> &mut T {
        // TODO
        todo!()
    }

    /// 释放锁。
    ///
    /// TODO: 将 locked 设为 false（使用 Release ordering）
    pub fn unlock(&self) {
        // TODO
        todo!()
    }

    /// 尝试获取锁，不自旋。
    /// 成功返回 Some(&mut T)，锁被占用时返回 None。
    pub fn try_lock(&self) -> Option<&mut T> {
        // TODO: 单次 compare_exchange 尝试
        todo!()
    }
}
