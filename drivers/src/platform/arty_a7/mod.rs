//! Digilent Arty A7 reference design
//!
//! RISC-V soft core (MicroBlaze V class, RV32IMAC, machine mode only) with
//! an AXI INTC on its machine external interrupt line. Device addresses and
//! interrupt wiring are in [`params`].

pub mod params;

#[cfg(target_arch = "riscv32")]
mod board;
#[cfg(target_arch = "riscv32")]
mod timer;

#[cfg(target_arch = "riscv32")]
pub use board::ArtyA7;
#[cfg(target_arch = "riscv32")]
pub use timer::McycleTimer;
