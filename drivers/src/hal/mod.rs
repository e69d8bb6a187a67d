//! Hardware Abstraction Layer (HAL) - Platform-Independent Traits
//!
//! This module defines generic traits for interacting with hardware
//! peripherals. These traits are implemented by the register drivers in
//! [`crate::peripheral`] and by the fakes in `crate::mock`, so firmware
//! logic is written once against the traits.
//!
//! # Available Interfaces
//!
//! - [`gpio`]: word-wide GPIO ports and their interrupts
//! - [`serial`]: Serial port (UART) communication
//! - [`interrupt`]: Interrupt controller management
//! - [`i2c`]: I2C bus controllers
//! - [`timer`]: Time base and blocking delays
//! - [`display`]: register-mapped displays

pub mod display;
pub mod gpio;
pub mod i2c;
pub mod interrupt;
pub mod serial;
pub mod timer;
