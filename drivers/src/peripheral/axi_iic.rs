//! Xilinx AXI IIC Bus Interface Driver
//!
//! Only controller bring-up and interrupt bookkeeping live here: reset,
//! address programming and acknowledging latched events. Transfers are
//! not implemented.

use crate::hal::i2c::{AddressType, I2cController, I2cError, I2cEvents, check_address};
use core::ptr::{read_volatile, write_volatile};

// Register offsets
const ISR_OFFSET: usize = 0x20;
const IER_OFFSET: usize = 0x28;
const SOFTR_OFFSET: usize = 0x40;
const CR_OFFSET: usize = 0x100;
const ADR_OFFSET: usize = 0x110;

/// Key written to SOFTR to reset the core
const SOFTR_KEY: u32 = 0xA;

/// AXI IIC driver.
#[derive(Debug)]
pub struct AxiIic {
    base: usize,
    target: Option<u8>,
}

impl AxiIic {
    /// Create a driver for the controller at `base`.
    ///
    /// # Safety
    ///
    /// - `base` must point to a mapped AXI IIC register block
    /// - Only one instance should exist per controller
    pub const unsafe fn new(base: usize) -> Self {
        Self { base, target: None }
    }

    #[inline]
    fn read_reg(&self, offset: usize) -> u32 {
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    #[inline]
    fn write_reg(&mut self, offset: usize, value: u32) {
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Soft-reset the core and check it came back disabled.
    pub fn initialize(&mut self) -> Result<(), I2cError> {
        self.write_reg(SOFTR_OFFSET, SOFTR_KEY);
        if self.read_reg(CR_OFFSET) != 0 {
            return Err(I2cError::ResetFailed);
        }
        self.target = None;
        Ok(())
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl I2cController for AxiIic {
    type Error = I2cError;

    fn set_address(&mut self, kind: AddressType, address: u16) -> Result<(), I2cError> {
        let address = check_address(address)?;
        match kind {
            AddressType::Send => self.target = Some(address),
            // ADR holds the address in bits 7:1
            AddressType::Respond => self.write_reg(ADR_OFFSET, (address as u32) << 1),
        }
        Ok(())
    }

    fn target_address(&self) -> Option<u16> {
        self.target.map(u16::from)
    }

    fn service_interrupt(&mut self) -> I2cEvents {
        let latched = self.read_reg(ISR_OFFSET) & self.read_reg(IER_OFFSET);
        // ISR is toggle-on-write
        self.write_reg(ISR_OFFSET, latched);
        I2cEvents::from_bits_truncate(latched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peripheral::testing::FakeRegisters;

    type Regs = FakeRegisters<{ 0x128 / 4 }>;

    #[test]
    fn reset_writes_key_and_checks_control_register() {
        let regs = Regs::new();
        let mut iic = unsafe { AxiIic::new(regs.base()) };

        assert_eq!(iic.initialize(), Ok(()));
        assert_eq!(regs.read(SOFTR_OFFSET), SOFTR_KEY);

        regs.write(CR_OFFSET, 0x1);
        assert_eq!(iic.initialize(), Err(I2cError::ResetFailed));
    }

    #[test]
    fn send_address_is_kept_respond_address_is_programmed() {
        let regs = Regs::new();
        let mut iic = unsafe { AxiIic::new(regs.base()) };

        iic.set_address(AddressType::Send, 0x4B).unwrap();
        assert_eq!(iic.target_address(), Some(0x4B));
        assert_eq!(regs.read(ADR_OFFSET), 0);

        iic.set_address(AddressType::Respond, 0x10).unwrap();
        assert_eq!(regs.read(ADR_OFFSET), 0x20);
    }

    #[test]
    fn ten_bit_addresses_are_rejected() {
        let regs = Regs::new();
        let mut iic = unsafe { AxiIic::new(regs.base()) };

        assert_eq!(
            iic.set_address(AddressType::Send, 0x96),
            Err(I2cError::InvalidAddress(0x96))
        );
        assert_eq!(iic.target_address(), None);
    }

    #[test]
    fn service_reports_only_enabled_events() {
        let regs = Regs::new();
        let mut iic = unsafe { AxiIic::new(regs.base()) };
        regs.write(IER_OFFSET, (I2cEvents::TX_EMPTY | I2cEvents::RX_FULL).bits());
        regs.write(
            ISR_OFFSET,
            (I2cEvents::RX_FULL | I2cEvents::NOT_ADDRESSED).bits(),
        );

        assert_eq!(iic.service_interrupt(), I2cEvents::RX_FULL);
        assert_eq!(regs.read(ISR_OFFSET), I2cEvents::RX_FULL.bits());
    }
}
