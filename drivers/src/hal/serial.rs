//! Serial Port (UART) Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for serial communication.
//! Line parameters are not configurable here: soft-core UARTs fix baud rate
//! and framing when the bitstream is built.

use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// Snapshot of a UART status register.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct UartStatus: u32 {
        /// Receive FIFO holds at least one byte.
        const RX_VALID = 1 << 0;
        const RX_FULL = 1 << 1;
        const TX_EMPTY = 1 << 2;
        const TX_FULL = 1 << 3;
        /// Interrupt output enabled.
        const INTR_ENABLED = 1 << 4;
        const OVERRUN = 1 << 5;
        const FRAME_ERROR = 1 << 6;
        const PARITY_ERROR = 1 << 7;
    }
}

/// Serial port errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SerialError {
    /// Framing error (invalid stop bit).
    Framing,
    /// Parity error (parity check failed).
    Parity,
    /// Overrun error (data received faster than it could be read).
    Overrun,
    /// Operation would block but non-blocking mode was requested.
    WouldBlock,
}

/// Serial port trait.
pub trait SerialPort {
    /// Error type for serial operations.
    type Error: core::fmt::Debug;

    /// Write a single byte (blocking).
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write multiple bytes (blocking).
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        for &byte in bytes {
            self.write_byte(byte)?;
        }
        Ok(bytes.len())
    }

    /// Read a single byte (blocking).
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Wait until everything written has left the transmitter.
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Check if the serial port is busy transmitting.
    fn is_busy(&self) -> bool;
}

/// Extension trait for non-blocking operations.
pub trait NonBlockingSerial: SerialPort {
    /// Try to write a byte without blocking.
    fn try_write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Try to read a byte without blocking.
    fn try_read_byte(&mut self) -> Result<u8, Self::Error>;
}

/// Extension trait for UARTs serviced from an interrupt handler.
///
/// These are raw FIFO accesses: no status check is made, the caller
/// consults [`InterruptSerial::status`] first.
pub trait InterruptSerial: SerialPort {
    /// Let the UART raise its interrupt on RX data / TX empty.
    fn enable_interrupt(&mut self) -> Result<(), Self::Error>;

    fn disable_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Read the status register.
    fn status(&self) -> UartStatus;

    /// Pop one byte from the receive FIFO.
    fn read_rx(&mut self) -> u8;

    /// Push one byte into the transmit FIFO.
    fn write_tx(&mut self, byte: u8);
}

/// Adapter implementing `core::fmt::Write` over a non-blocking port.
///
/// Converts `\n` to `\r\n`. Bytes the port cannot take right now are
/// dropped, so formatting never stalls on a full transmitter.
pub struct SerialWriter<'a, T: NonBlockingSerial>(pub &'a mut T);

impl<T: NonBlockingSerial> fmt::Write for SerialWriter<'_, T> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if byte == b'\n' {
                let _ = self.0.try_write_byte(b'\r');
            }
            let _ = self.0.try_write_byte(byte);
        }
        Ok(())
    }
}
