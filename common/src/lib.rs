//! Shared `no_std` building blocks for the firmware workspace.
//!
//! - [`sync`]: spinlocks, including one that masks hart interrupts while held
//! - [`arch`]: per-architecture interrupt masking behind [`sync::irq::IrqControl`]

#![no_std]

pub mod arch;
pub mod sync;

#[cfg(test)]
extern crate std;
