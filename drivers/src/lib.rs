//! Hardware Driver Subsystem
//!
//! This crate provides a layered architecture for hardware abstraction:
//!
//! # Module Organization
//!
//! - [`hal`]: Platform-independent trait definitions
//! - [`platform`]: Board descriptions that hand out driver instances
//! - [`peripheral`]: Register drivers for the FPGA soft IP
//! - [`console`]: `log` backend on a serial port
//! - `mock`: host-side fakes of every HAL trait (feature `mock`)
//!
//! # Usage Example
//!
//! ```no_run
//! use drivers::hal::serial::SerialPort;
//! use drivers::peripheral::uartlite::UartLite;
//!
//! let mut uart = unsafe { UartLite::new(0x4060_0000) };
//! uart.initialize();
//! uart.write(b"Hello, world!\n").ok();
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

pub mod console;
pub mod hal;
pub mod peripheral;
pub mod platform;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use hal::gpio::{Channel, GpioInterrupts, GpioPort};
pub use hal::interrupt::{InterruptController, VectorId};
pub use hal::serial::{InterruptSerial, SerialPort};
pub use hal::timer::CountingTimer;
