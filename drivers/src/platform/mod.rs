//! Platform Abstraction Layer
//!
//! A platform turns device ids from its hardware description into driver
//! instances, the way a board support package's `*_Initialize(id)` calls do.
//! Each board implements the [`Platform`] trait; firmware is generic over it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use drivers::platform::{CurrentPlatform, Platform};
//!
//! let mut platform = unsafe { CurrentPlatform::take() };
//! let leds = platform.init_gpio(LED_DEVICE_ID)?;
//! ```

use core::fmt;

use crate::hal::display::SegmentDisplay;
use crate::hal::gpio::{GpioError, GpioInterrupts};
use crate::hal::i2c::{I2cController, I2cError};
use crate::hal::interrupt::{IntcError, InterruptController};
use crate::hal::serial::{InterruptSerial, NonBlockingSerial, SerialError};
use crate::hal::timer::CountingTimer;
use thiserror::Error;

/// Device instance number in a platform's hardware description.
pub type DeviceId = u16;

/// Kind of device, for diagnostics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeviceKind {
    Gpio,
    Uart,
    InterruptController,
    Iic,
    Display,
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceKind::Gpio => "GPIO",
            DeviceKind::Uart => "UART",
            DeviceKind::InterruptController => "interrupt controller",
            DeviceKind::Iic => "IIC",
            DeviceKind::Display => "display",
        })
    }
}

/// Errors raised while turning a device id into a driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("no {kind} with device id {id}")]
    ConfigNotFound { kind: DeviceKind, id: DeviceId },
    #[error("{kind} {id} did not come out of reset")]
    InitFailed { kind: DeviceKind, id: DeviceId },
}

// ============================================================================
// Hardware description
// ============================================================================

/// An entry of a platform's device table.
pub trait DeviceConfig {
    const KIND: DeviceKind;

    fn device_id(&self) -> DeviceId;
}

/// Find the entry for `id` in a device table.
pub fn lookup_config<C: DeviceConfig>(
    table: &'static [C],
    id: DeviceId,
) -> Result<&'static C, PlatformError> {
    table
        .iter()
        .find(|config| config.device_id() == id)
        .ok_or(PlatformError::ConfigNotFound { kind: C::KIND, id })
}

macro_rules! device_config {
    ($config:ident, $kind:expr) => {
        impl DeviceConfig for $config {
            const KIND: DeviceKind = $kind;

            fn device_id(&self) -> DeviceId {
                self.device_id
            }
        }
    };
}

#[derive(Debug, Clone, Copy)]
pub struct GpioConfig {
    pub device_id: DeviceId,
    pub base_address: usize,
    /// Second channel present
    pub dual: bool,
    /// Interrupt block present
    pub interrupts: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    pub device_id: DeviceId,
    pub base_address: usize,
    /// Fixed at synthesis; informational
    pub baud_rate: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct IntcConfig {
    pub device_id: DeviceId,
    pub base_address: usize,
    /// Number of connected inputs
    pub inputs: u8,
}

#[derive(Debug, Clone, Copy)]
pub struct IicConfig {
    pub device_id: DeviceId,
    pub base_address: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct DisplayConfig {
    pub device_id: DeviceId,
    pub base_address: usize,
}

device_config!(GpioConfig, DeviceKind::Gpio);
device_config!(UartConfig, DeviceKind::Uart);
device_config!(IntcConfig, DeviceKind::InterruptController);
device_config!(IicConfig, DeviceKind::Iic);
device_config!(DisplayConfig, DeviceKind::Display);

// ============================================================================
// Platform trait
// ============================================================================

/// Platform trait - implemented by each supported board
pub trait Platform {
    type Gpio: GpioInterrupts<Error = GpioError> + Send;
    type Uart: InterruptSerial<Error = SerialError> + NonBlockingSerial + Send;
    type Intc: InterruptController<Error = IntcError> + Send;
    type Iic: I2cController<Error = I2cError> + Send;
    type Display: SegmentDisplay;
    type Timer: CountingTimer + Sync;

    /// Platform name for debugging
    fn name(&self) -> &'static str;

    /// Bring up the GPIO port `id`.
    fn init_gpio(&mut self, id: DeviceId) -> Result<Self::Gpio, PlatformError>;

    /// Bring up UART `id` with empty FIFOs and its interrupt off.
    fn init_uart(&mut self, id: DeviceId) -> Result<Self::Uart, PlatformError>;

    /// Bring up interrupt controller `id`: stopped, every line masked.
    fn init_interrupt_controller(&mut self, id: DeviceId) -> Result<Self::Intc, PlatformError>;

    /// Bring up IIC controller `id` out of reset.
    fn init_iic(&mut self, id: DeviceId) -> Result<Self::Iic, PlatformError>;

    fn init_display(&mut self, id: DeviceId) -> Result<Self::Display, PlatformError>;

    /// Time base for blocking delays.
    fn timer(&mut self) -> Self::Timer;

    /// Route the CPU's external interrupt to the dispatch routine and
    /// unmask it.
    ///
    /// # Safety
    /// Everything the dispatch routine touches must be initialised; an
    /// interrupt may be taken before this returns.
    unsafe fn install_interrupt_handler(&mut self);
}

// Board selection based on Cargo features
cfg_if::cfg_if! {
    if #[cfg(feature = "arty-a7")] {
        pub mod arty_a7;
        #[cfg(target_arch = "riscv32")]
        pub use arty_a7::ArtyA7 as CurrentPlatform;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static GPIOS: [GpioConfig; 2] = [
        GpioConfig {
            device_id: 0,
            base_address: 0x4000_0000,
            dual: false,
            interrupts: false,
        },
        GpioConfig {
            device_id: 3,
            base_address: 0x4001_0000,
            dual: true,
            interrupts: true,
        },
    ];

    #[test]
    fn lookup_finds_by_device_id_not_position() {
        let config = lookup_config(&GPIOS, 3).unwrap();
        assert_eq!(config.base_address, 0x4001_0000);
    }

    #[test]
    fn missing_id_names_kind_and_id() {
        let err = lookup_config(&GPIOS, 1).unwrap_err();
        assert_eq!(
            err,
            PlatformError::ConfigNotFound {
                kind: DeviceKind::Gpio,
                id: 1
            }
        );
    }
}
