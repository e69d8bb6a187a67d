//! Xilinx AXI GPIO Driver
//!
//! One or two 32-bit channels, each with a data and a tri-state (direction)
//! register, plus an optional interrupt block that latches input changes
//! per channel.

use crate::hal::gpio::{Channel, GpioError, GpioInterrupts, GpioPort};
use core::ptr::{read_volatile, write_volatile};

// Register offsets
const DATA_OFFSET: usize = 0x00;
const TRI_OFFSET: usize = 0x04;
const DATA2_OFFSET: usize = 0x08;
const TRI2_OFFSET: usize = 0x0C;
const GIER_OFFSET: usize = 0x11C;
const ISR_OFFSET: usize = 0x120;
const IER_OFFSET: usize = 0x128;

/// Global interrupt enable bit in GIER
const GIER_ENABLE: u32 = 1 << 31;

/// AXI GPIO driver.
#[derive(Debug)]
pub struct AxiGpio {
    base: usize,
    dual: bool,
    interrupts: bool,
}

impl AxiGpio {
    /// Create a driver for the block at `base`.
    ///
    /// `dual` and `interrupts` must match how the block was synthesised.
    ///
    /// # Safety
    ///
    /// - `base` must point to a mapped AXI GPIO register block
    /// - Only one instance should exist per block
    pub const unsafe fn new(base: usize, dual: bool, interrupts: bool) -> Self {
        Self {
            base,
            dual,
            interrupts,
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

    /// Data and tri-state register offsets for `channel`.
    fn channel_regs(&self, channel: Channel) -> Result<(usize, usize), GpioError> {
        match channel {
            Channel::One => Ok((DATA_OFFSET, TRI_OFFSET)),
            Channel::Two if self.dual => Ok((DATA2_OFFSET, TRI2_OFFSET)),
            Channel::Two => Err(GpioError::InvalidChannel),
        }
    }

    fn check_interrupts(&self) -> Result<(), GpioError> {
        if self.interrupts {
            Ok(())
        } else {
            Err(GpioError::NoInterrupts)
        }
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl GpioPort for AxiGpio {
    type Error = GpioError;

    fn set_direction(&mut self, channel: Channel, input_mask: u32) -> Result<(), GpioError> {
        let (_, tri) = self.channel_regs(channel)?;
        self.write_reg(tri, input_mask);
        Ok(())
    }

    fn write(&mut self, channel: Channel, value: u32) -> Result<(), GpioError> {
        let (data, _) = self.channel_regs(channel)?;
        self.write_reg(data, value);
        Ok(())
    }

    fn read(&self, channel: Channel) -> Result<u32, GpioError> {
        let (data, _) = self.channel_regs(channel)?;
        Ok(self.read_reg(data))
    }
}

impl GpioInterrupts for AxiGpio {
    fn enable_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.check_interrupts()?;
        self.channel_regs(channel)?;
        let ier = self.read_reg(IER_OFFSET);
        self.write_reg(IER_OFFSET, ier | channel.mask());
        Ok(())
    }

    fn disable_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.check_interrupts()?;
        self.channel_regs(channel)?;
        let ier = self.read_reg(IER_OFFSET);
        self.write_reg(IER_OFFSET, ier & !channel.mask());
        Ok(())
    }

    fn clear_interrupt(&mut self, channel: Channel) -> Result<(), GpioError> {
        self.check_interrupts()?;
        self.channel_regs(channel)?;
        // ISR is toggle-on-write: write back only the latched bit of this channel
        let isr = self.read_reg(ISR_OFFSET);
        self.write_reg(ISR_OFFSET, isr & channel.mask());
        Ok(())
    }

    fn enable_global_interrupt(&mut self) -> Result<(), GpioError> {
        self.check_interrupts()?;
        self.write_reg(GIER_OFFSET, GIER_ENABLE);
        Ok(())
    }

    fn interrupt_status(&self) -> u32 {
        if self.interrupts {
            self.read_reg(ISR_OFFSET)
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripheral::testing::FakeRegisters;

    fn port(regs: &FakeRegisters<{ 0x130 / 4 }>, dual: bool) -> AxiGpio {
        unsafe { AxiGpio::new(regs.base(), dual, true) }
    }

    #[test]
    fn direction_and_data_land_in_channel_registers() {
        let regs = FakeRegisters::new();
        let mut gpio = port(&regs, true);

        gpio.set_direction(Channel::One, 0x1).unwrap();
        gpio.write(Channel::One, 0xFFFF).unwrap();
        gpio.set_direction(Channel::Two, 0xFF).unwrap();

        assert_eq!(regs.read(TRI_OFFSET), 0x1);
        assert_eq!(regs.read(DATA_OFFSET), 0xFFFF);
        assert_eq!(regs.read(TRI2_OFFSET), 0xFF);
        assert_eq!(gpio.read(Channel::One), Ok(0xFFFF));
    }

    #[test]
    fn single_channel_port_rejects_channel_two() {
        let regs = FakeRegisters::new();
        let mut gpio = port(&regs, false);

        assert_eq!(gpio.write(Channel::Two, 1), Err(GpioError::InvalidChannel));
        assert_eq!(
            gpio.enable_interrupt(Channel::Two),
            Err(GpioError::InvalidChannel)
        );
        assert_eq!(regs.read(DATA2_OFFSET), 0);
    }

    #[test]
    fn interrupt_enable_touches_only_its_channel_bit() {
        let regs = FakeRegisters::new();
        let mut gpio = port(&regs, true);

        gpio.enable_interrupt(Channel::Two).unwrap();
        gpio.enable_interrupt(Channel::One).unwrap();
        assert_eq!(regs.read(IER_OFFSET), 0b11);

        gpio.disable_interrupt(Channel::Two).unwrap();
        assert_eq!(regs.read(IER_OFFSET), 0b01);

        gpio.enable_global_interrupt().unwrap();
        assert_eq!(regs.read(GIER_OFFSET), GIER_ENABLE);
    }

    #[test]
    fn clear_writes_back_the_latched_channel_bit() {
        let regs = FakeRegisters::new();
        let mut gpio = port(&regs, true);
        regs.write(ISR_OFFSET, 0b11);

        gpio.clear_interrupt(Channel::One).unwrap();

        // a real block toggles; the fake keeps what was written
        assert_eq!(regs.read(ISR_OFFSET), 0b01);
    }

    #[test]
    fn ports_without_interrupts_refuse_interrupt_calls() {
        let regs = FakeRegisters::<{ 0x130 / 4 }>::new();
        let mut gpio = unsafe { AxiGpio::new(regs.base(), false, false) };

        assert_eq!(gpio.enable_global_interrupt(), Err(GpioError::NoInterrupts));
        assert_eq!(gpio.interrupt_status(), 0);
    }
}
