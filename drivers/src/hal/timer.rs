//! Timer Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for time keeping and
//! blocking delays.

/// Free-running time base.
pub trait CountingTimer {
    /// Read the current counter value in microseconds.
    ///
    /// This is a free-running counter that increments continuously.
    fn now_us(&self) -> u64;

    /// Busy-wait delay for the specified number of microseconds.
    ///
    /// This blocks the CPU. Interrupts keep being serviced meanwhile.
    fn delay_us(&self, us: u32) {
        let start = self.now_us();
        let duration = us as u64;

        while self.now_us().wrapping_sub(start) < duration {
            core::hint::spin_loop();
        }
    }

    /// Busy-wait delay for the specified number of milliseconds.
    fn delay_ms(&self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
}
