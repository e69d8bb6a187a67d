//! Button event latch.
//!
//! The GPIO handler raises the latch; the main loop reacts and lowers it.
//! Only one press can be outstanding: the handler masks the channel before
//! clearing its status, so a second edge is neither lost nor re-entered
//! while the status bit is still set.

use core::sync::atomic::{AtomicBool, Ordering};

use drivers::hal::gpio::{Channel, GpioInterrupts};

#[derive(Debug, Default)]
pub struct ButtonLatch {
    pending: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
        }
    }

    pub fn set(&self) {
        self.pending.store(true, Ordering::Release);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    pub fn clear(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

/// Button interrupt body. The order of the four steps is load-bearing.
pub fn service<G: GpioInterrupts>(latch: &ButtonLatch, key: &mut G, channel: Channel) {
    latch.set();
    key.disable_interrupt(channel).ok();
    key.clear_interrupt(channel).ok();
    key.enable_interrupt(channel).ok();
}
