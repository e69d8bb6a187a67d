//! A mock board wired like the Arty A7, with handles kept for inspection.

#![allow(dead_code)]

use drivers::mock::{
    MockDisplay, MockGpio, MockIic, MockIntc, MockPlatform, MockTimer, MockUart,
};
use firmware::{BoardConfig, BootError, Firmware};

pub struct Board {
    pub leds: MockGpio,
    pub key: MockGpio,
    pub uart: MockUart,
    pub intc: MockIntc,
    pub iic: MockIic,
    pub display: MockDisplay,
    pub timer: MockTimer,
    pub config: BoardConfig,
}

impl Board {
    pub fn new() -> Self {
        Self {
            leds: MockGpio::output_only(),
            key: MockGpio::new(),
            uart: MockUart::new(),
            intc: MockIntc::new(),
            iic: MockIic::new(),
            display: MockDisplay::new(),
            timer: MockTimer::new(),
            config: BoardConfig::default(),
        }
    }

    pub fn platform(&self) -> MockPlatform {
        let c = &self.config;
        MockPlatform::new()
            .with_gpio(c.led_gpio, self.leds.clone())
            .with_gpio(c.key_gpio, self.key.clone())
            .with_uart(c.uart, self.uart.clone())
            .with_intc(c.intc, self.intc.clone())
            .with_iic(c.iic, self.iic.clone())
            .with_display(c.display, self.display.clone())
            .with_timer(self.timer.clone())
    }

    pub fn boot(&self) -> Result<Firmware<MockPlatform>, BootError> {
        Firmware::boot(&mut self.platform(), &self.config)
    }

    /// Boot and return a firmware with clean operation logs.
    pub fn running(&self) -> Firmware<MockPlatform> {
        let firmware = self.boot().expect("mock board boots");
        self.leds.clear_ops();
        self.key.clear_ops();
        firmware
    }

    /// A button edge: GPIO status latched and the controller line raised.
    pub fn press_edge(&self) {
        self.key.raise_interrupt(drivers::Channel::One);
        self.intc.raise(self.config.key_vector);
    }

    pub fn uart_byte(&self, byte: u8) {
        self.uart.receive(&[byte]);
        self.intc.raise(self.config.uart_vector);
    }
}
