use crate::hal::timer::CountingTimer;
use crate::platform::arty_a7::params::cycles_per_us;
use riscv::register::mcycle;

/// Time base on the hart's cycle counter.
#[derive(Debug, Clone, Copy)]
pub struct McycleTimer {
    cycles_per_us: u64,
}

impl McycleTimer {
    pub const fn new(cpu_clock_hz: u32) -> Self {
        Self {
            cycles_per_us: cycles_per_us(cpu_clock_hz),
        }
    }
}

impl CountingTimer for McycleTimer {
    fn now_us(&self) -> u64 {
        mcycle::read64() / self.cycles_per_us
    }
}
