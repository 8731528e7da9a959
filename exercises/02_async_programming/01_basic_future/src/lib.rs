//! # 手动实现 Future
//!
//! 本练习中，你需要手动为自定义类型实现 `Future` trait，理解异步运行时的核心机制。
//!
//! ## 知识点
//! - `std::future::Future` trait
//! - `Poll::Ready` 与 `Poll::Pending`
//! - `Waker` 的作用：通知运行时重新 poll

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// 倒计时 Future：每次被 poll 时 count 减 1，
/// 当 count 为 0 时返回 `"liftoff!"`。
pub struct CountDown {
    pub count: u32,
}

impl CountDown {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

// TODO: 为 CountDown 实现 Future trait
// - Output 类型为 &'static str
// - 每次 poll: 若 count == 0，返回 Poll::Ready("liftoff!")
// - 否则 count -= 1，调用 cx.waker().wake_by_ref()，返回 Poll::Pending
//
// 提示：使用 `self.get_mut()` 获取 `&mut Self`（因为 self 是 Pin<&mut Self>）
impl Future for CountDown {
    type Output = &'static str;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        todo!()
    }
}

/// 只 yield 一次的 Future：第一次 poll 返回 Pending，第二次返回 Ready(())。
/// 这是异步状态机的最小示例。
pub struct YieldOnce {
    yielded: bool,
}

impl YieldOnce {
    pub fn new() -> Self {
        Self { yielded: false }
    }
}

// TODO: 为 YieldOnce 实现 Future trait
// - Output 类型为 ()
// - 第一次 poll：设置 yielded = true，唤醒 waker，返回 Pending
// - 第二次 poll：返回 Ready(())
impl Future for YieldOnce {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        todo!()
    }
}
