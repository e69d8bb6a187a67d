//! Peripheral Drivers
//!
//! Register-level drivers for the soft IP found in FPGA designs, each
//! implementing the matching [`crate::hal`] traits.
//!
//! # Available Peripherals
//!
//! - [`axi_gpio`]: Xilinx AXI GPIO
//! - [`uartlite`]: Xilinx AXI UART Lite
//! - [`axi_intc`]: Xilinx AXI Interrupt Controller
//! - [`axi_iic`]: Xilinx AXI IIC bus interface
//! - [`seven_segment`]: custom seven-segment register block

pub mod axi_gpio;
pub mod axi_iic;
pub mod axi_intc;
pub mod seven_segment;
pub mod uartlite;

#[cfg(test)]
pub(crate) mod testing;
