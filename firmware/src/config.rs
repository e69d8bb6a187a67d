//! Application configuration: which devices and vectors the firmware uses and
//! the values it programs into them at boot.

use drivers::hal::gpio::Channel;
use drivers::hal::interrupt::VectorId;
use drivers::platform::DeviceId;
use log::LevelFilter;

/// On-chip temperature sensor on the IIC bus.
pub const TEMP_SENSOR_ONCHIP_ADDRESS: u16 = 0x4B;
/// Ambient temperature sensor on the IIC bus.
pub const TEMP_SENSOR_AMBIENT_ADDRESS: u16 = 0x0B;

/// LEDs are on the first channel of their port.
pub const LED_CHANNEL: Channel = Channel::One;
/// So is the button.
pub const KEY_CHANNEL: Channel = Channel::One;

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub led_gpio: DeviceId,
    pub key_gpio: DeviceId,
    pub uart: DeviceId,
    pub intc: DeviceId,
    pub iic: DeviceId,
    pub display: DeviceId,

    pub uart_vector: VectorId,
    pub key_vector: VectorId,
    pub iic_vector: VectorId,

    /// LED output value before the first press
    pub led_initial: u32,
    /// Direction mask of the button channel (1 = input)
    pub key_input_mask: u32,
    /// Blocking hold after each serviced press
    pub hold_ms: u32,
    /// Written once to the seven-segment registers
    pub display_pattern: [u32; 4],
    pub sensor_address: u16,
    pub log_level: LevelFilter,
}

impl BoardConfig {
    /// Values that do not depend on the board.
    const fn with_devices(
        devices: [DeviceId; 6],
        uart_vector: VectorId,
        key_vector: VectorId,
        iic_vector: VectorId,
    ) -> Self {
        let [led_gpio, key_gpio, uart, intc, iic, display] = devices;
        Self {
            led_gpio,
            key_gpio,
            uart,
            intc,
            iic,
            display,
            uart_vector,
            key_vector,
            iic_vector,
            led_initial: 0xFFFF,
            key_input_mask: 0x1,
            hold_ms: 1000,
            display_pattern: [0, 0, 0, 0xF],
            sensor_address: TEMP_SENSOR_ONCHIP_ADDRESS,
            log_level: LevelFilter::Info,
        }
    }
}

#[cfg(feature = "arty-a7")]
impl BoardConfig {
    pub const ARTY_A7: Self = {
        use drivers::platform::arty_a7::params::*;
        Self::with_devices(
            [
                LED_GPIO_DEVICE_ID,
                KEY_GPIO_DEVICE_ID,
                UARTLITE_DEVICE_ID,
                INTC_DEVICE_ID,
                IIC_DEVICE_ID,
                SEVEN_SEGMENT_DEVICE_ID,
            ],
            UARTLITE_VECTOR,
            KEY_GPIO_VECTOR,
            IIC_VECTOR,
        )
    };
}

/// Device ids 0..=5 in order, vectors 0 (UART), 1 (button), 2 (IIC).
/// Handy for boards assembled in tests.
impl Default for BoardConfig {
    fn default() -> Self {
        Self::with_devices([0, 1, 2, 3, 4, 5], 0, 1, 2)
    }
}
