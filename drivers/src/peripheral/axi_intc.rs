//! Xilinx AXI Interrupt Controller Driver
//!
//! Collects up to 32 peripheral interrupt lines into the CPU's single
//! external interrupt input. Lower vector numbers have higher priority.

use crate::hal::interrupt::{IntcError, InterruptController, StartMode, VectorId, check_vector};
use core::ptr::{read_volatile, write_volatile};

// Register offsets
const ISR_OFFSET: usize = 0x00;
const IER_OFFSET: usize = 0x08;
const IAR_OFFSET: usize = 0x0C;
const MER_OFFSET: usize = 0x1C;

// Master Enable Register (MER) bits
const MER_ME: u32 = 1 << 0;
const MER_HIE: u32 = 1 << 1;

/// AXI INTC driver.
#[derive(Debug)]
pub struct AxiIntc {
    base: usize,
    started: bool,
}

impl AxiIntc {
    /// Create a driver for the controller at `base`.
    ///
    /// # Safety
    ///
    /// - `base` must point to a mapped AXI INTC register block
    /// - Only one instance should exist per controller
    pub const unsafe fn new(base: usize) -> Self {
        Self {
            base,
            started: false,
        }
    }

    #[inline]
    fn read_reg(&self, offset: usize) -> u32 {
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    #[inline]
    fn write_reg(&mut self, offset: usize, value: u32) {
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Stop the controller, mask every line and drop stale requests.
    pub fn initialize(&mut self) {
        self.write_reg(MER_OFFSET, 0);
        self.write_reg(IER_OFFSET, 0);
        self.write_reg(IAR_OFFSET, u32::MAX);
        self.started = false;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl InterruptController for AxiIntc {
    type Error = IntcError;

    fn enable(&mut self, vector: VectorId) -> Result<(), IntcError> {
        let mask = check_vector(vector)?;
        let ier = self.read_reg(IER_OFFSET);
        self.write_reg(IER_OFFSET, ier | mask);
        Ok(())
    }

    fn start(&mut self, mode: StartMode) -> Result<(), IntcError> {
        if self.started {
            return Err(IntcError::AlreadyStarted);
        }
        let mer = match mode {
            StartMode::Simulation => MER_ME,
            StartMode::Real => MER_ME | MER_HIE,
        };
        self.write_reg(MER_OFFSET, mer);
        self.started = true;
        Ok(())
    }

    fn active(&self) -> u32 {
        self.read_reg(ISR_OFFSET) & self.read_reg(IER_OFFSET)
    }

    fn acknowledge(&mut self, vector: VectorId) -> Result<(), IntcError> {
        let mask = check_vector(vector)?;
        self.write_reg(IAR_OFFSET, mask);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripheral::testing::FakeRegisters;

    fn intc(regs: &FakeRegisters<8>) -> AxiIntc {
        let mut intc = unsafe { AxiIntc::new(regs.base()) };
        intc.initialize();
        intc
    }

    #[test]
    fn initialize_masks_and_acknowledges_everything() {
        let regs = FakeRegisters::new();
        regs.write(MER_OFFSET, MER_ME | MER_HIE);
        regs.write(IER_OFFSET, 0xFF);

        let intc = intc(&regs);

        assert_eq!(regs.read(MER_OFFSET), 0);
        assert_eq!(regs.read(IER_OFFSET), 0);
        assert_eq!(regs.read(IAR_OFFSET), u32::MAX);
        assert!(!intc.is_started());
    }

    #[test]
    fn enable_keeps_other_lines() {
        let regs = FakeRegisters::new();
        let mut intc = intc(&regs);

        intc.enable(0).unwrap();
        intc.enable(2).unwrap();

        assert_eq!(regs.read(IER_OFFSET), 0b101);
        assert_eq!(intc.enable(32), Err(IntcError::InvalidVector(32)));
    }

    #[test]
    fn real_mode_drives_the_cpu_output_once() {
        let regs = FakeRegisters::new();
        let mut intc = intc(&regs);

        intc.start(StartMode::Real).unwrap();
        assert_eq!(regs.read(MER_OFFSET), MER_ME | MER_HIE);
        assert_eq!(intc.start(StartMode::Real), Err(IntcError::AlreadyStarted));
    }

    #[test]
    fn active_lines_are_raised_and_enabled() {
        let regs = FakeRegisters::new();
        let mut intc = intc(&regs);
        intc.enable(1).unwrap();
        intc.enable(2).unwrap();
        regs.write(ISR_OFFSET, 0b1011);

        assert_eq!(intc.active(), 0b0010);

        intc.acknowledge(1).unwrap();
        assert_eq!(regs.read(IAR_OFFSET), 0b10);
    }
}
