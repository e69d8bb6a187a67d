//! Xilinx AXI UART Lite Driver
//!
//! Fixed-format UART (baud rate and framing are chosen when the bitstream
//! is built) with 16-byte receive and transmit FIFOs and a single interrupt
//! raised on receive data or transmit FIFO empty.
//!
//! # Example
//!
//! ```no_run
//! use drivers::hal::serial::SerialPort;
//! use drivers::peripheral::uartlite::UartLite;
//!
//! let mut uart = unsafe { UartLite::new(0x4060_0000) };
//! uart.initialize();
//! uart.write(b"Hello, world!\r\n").unwrap();
//! ```

use crate::hal::serial::{
    InterruptSerial, NonBlockingSerial, SerialError, SerialPort, UartStatus,
};
use core::ptr::{read_volatile, write_volatile};

// Register offsets
const RX_FIFO_OFFSET: usize = 0x00;
const TX_FIFO_OFFSET: usize = 0x04;
const STATUS_OFFSET: usize = 0x08;
const CONTROL_OFFSET: usize = 0x0C;

// Control register bits (write-only register)
const CTRL_RST_TX: u32 = 1 << 0;
const CTRL_RST_RX: u32 = 1 << 1;
const CTRL_ENABLE_INTR: u32 = 1 << 4;

/// UART Lite driver.
#[derive(Debug)]
pub struct UartLite {
    base: usize,
}

impl UartLite {
    /// Create a new UART Lite instance.
    ///
    /// # Safety
    ///
    /// - `base` must point to a valid UART Lite register block
    /// - Only one instance should own the receive side
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    #[inline]
    fn read_reg(&self, offset: usize) -> u32 {
        unsafe { read_volatile((self.base + offset) as *const u32) }
    }

    #[inline]
    fn write_reg(&mut self, offset: usize, value: u32) {
        unsafe { write_volatile((self.base + offset) as *mut u32, value) }
    }

    /// Flush both FIFOs. Leaves the interrupt disabled.
    pub fn initialize(&mut self) {
        self.write_reg(CONTROL_OFFSET, CTRL_RST_TX | CTRL_RST_RX);
    }

    /// Error condition latched in `status`, if any.
    fn error_in(status: UartStatus) -> Option<SerialError> {
        if status.contains(UartStatus::OVERRUN) {
            Some(SerialError::Overrun)
        } else if status.contains(UartStatus::FRAME_ERROR) {
            Some(SerialError::Framing)
        } else if status.contains(UartStatus::PARITY_ERROR) {
            Some(SerialError::Parity)
        } else {
            None
        }
    }
}

// ============================================================================
// HAL Implementation
// ============================================================================

impl SerialPort for UartLite {
    type Error = SerialError;

    fn write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        while self.status().contains(UartStatus::TX_FULL) {
            core::hint::spin_loop();
        }
        self.write_tx(byte);
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, SerialError> {
        loop {
            match self.try_read_byte() {
                Err(SerialError::WouldBlock) => core::hint::spin_loop(),
                other => return other,
            }
        }
    }

    fn flush(&mut self) -> Result<(), SerialError> {
        while self.is_busy() {
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn is_busy(&self) -> bool {
        !self.status().contains(UartStatus::TX_EMPTY)
    }
}

impl NonBlockingSerial for UartLite {
    fn try_write_byte(&mut self, byte: u8) -> Result<(), SerialError> {
        if self.status().contains(UartStatus::TX_FULL) {
            return Err(SerialError::WouldBlock);
        }
        self.write_tx(byte);
        Ok(())
    }

    fn try_read_byte(&mut self) -> Result<u8, SerialError> {
        // Reading STATUS clears the error bits
        let status = self.status();
        if let Some(err) = Self::error_in(status) {
            return Err(err);
        }
        if status.contains(UartStatus::RX_VALID) {
            Ok(self.read_rx())
        } else {
            Err(SerialError::WouldBlock)
        }
    }
}

impl InterruptSerial for UartLite {
    fn enable_interrupt(&mut self) -> Result<(), SerialError> {
        self.write_reg(CONTROL_OFFSET, CTRL_ENABLE_INTR);
        Ok(())
    }

    fn disable_interrupt(&mut self) -> Result<(), SerialError> {
        self.write_reg(CONTROL_OFFSET, 0);
        Ok(())
    }

    fn status(&self) -> UartStatus {
        UartStatus::from_bits_truncate(self.read_reg(STATUS_OFFSET))
    }

    fn read_rx(&mut self) -> u8 {
        self.read_reg(RX_FIFO_OFFSET) as u8
    }

    fn write_tx(&mut self, byte: u8) {
        self.write_reg(TX_FIFO_OFFSET, byte as u32);
    }
}
