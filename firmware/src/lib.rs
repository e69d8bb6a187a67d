//! Interrupt-driven bring-up firmware for an FPGA soft core.
//!
//! The button GPIO, the UART and the IIC controller raise interrupts through
//! a single interrupt controller. The button handler latches a press that
//! the main loop turns into an LED step; the UART handler echoes received
//! bytes; the IIC handlers keep transfer completion flags.
//!
//! Everything is generic over [`drivers::platform::Platform`], so the same
//! code runs against the board's registers and against `drivers::mock` on
//! the host.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod boot;
pub mod button;
pub mod config;
pub mod echo;
pub mod irq;
pub mod sensor;
pub mod sequencer;

pub use boot::{BootError, Firmware, Poll};
pub use config::BoardConfig;
