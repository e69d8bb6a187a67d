//! Hardware description exported from the block design.
//!
//! Device ids index the tables below; vector ids are the INTC input each
//! peripheral interrupt is concatenated onto.

use crate::hal::interrupt::VectorId;
use crate::platform::{
    DeviceId, DisplayConfig, GpioConfig, IicConfig, IntcConfig, UartConfig,
};

/// Core clock, also the `mcycle` rate
pub const CPU_CLOCK_HZ: u32 = 100_000_000;

/// `mcycle` ticks per microsecond at `cpu_clock_hz`, never below one.
pub const fn cycles_per_us(cpu_clock_hz: u32) -> u64 {
    let cycles = (cpu_clock_hz / 1_000_000) as u64;
    if cycles == 0 { 1 } else { cycles }
}

/// AXI peripheral window
pub const PERIPHERAL_BASE: usize = 0x4000_0000;
pub const PERIPHERAL_SIZE: usize = 0x1000_0000;

// Device ids
pub const LED_GPIO_DEVICE_ID: DeviceId = 0;
pub const KEY_GPIO_DEVICE_ID: DeviceId = 1;
pub const UARTLITE_DEVICE_ID: DeviceId = 0;
pub const INTC_DEVICE_ID: DeviceId = 0;
pub const IIC_DEVICE_ID: DeviceId = 0;
pub const SEVEN_SEGMENT_DEVICE_ID: DeviceId = 0;

// INTC input wiring
pub const UARTLITE_VECTOR: VectorId = 0;
pub const KEY_GPIO_VECTOR: VectorId = 1;
pub const IIC_VECTOR: VectorId = 2;

pub static GPIO_TABLE: [GpioConfig; 2] = [
    GpioConfig {
        device_id: LED_GPIO_DEVICE_ID,
        base_address: 0x4000_0000,
        dual: false,
        interrupts: false,
    },
    GpioConfig {
        device_id: KEY_GPIO_DEVICE_ID,
        base_address: 0x4001_0000,
        dual: false,
        interrupts: true,
    },
];

pub static UART_TABLE: [UartConfig; 1] = [UartConfig {
    device_id: UARTLITE_DEVICE_ID,
    base_address: 0x4060_0000,
    baud_rate: 115_200,
}];

pub static INTC_TABLE: [IntcConfig; 1] = [IntcConfig {
    device_id: INTC_DEVICE_ID,
    base_address: 0x4120_0000,
    inputs: 3,
}];

pub static IIC_TABLE: [IicConfig; 1] = [IicConfig {
    device_id: IIC_DEVICE_ID,
    base_address: 0x4080_0000,
}];

pub static DISPLAY_TABLE: [DisplayConfig; 1] = [DisplayConfig {
    device_id: SEVEN_SEGMENT_DEVICE_ID,
    base_address: 0x44A0_0000,
}];
