//! Bring-up and the main loop.
//!
//! [`Firmware::boot`] initialises every peripheral, wires the interrupt
//! sources to their handlers and starts the controller. The result is the
//! single context the handlers and the main loop share; the entry point
//! moves it to a `'static` home before calling [`Firmware::install`], so no
//! interrupt ever sees a half-built context.

use common::arch::ArchIrq;
use common::sync::{IrqSpinLock, SpinLock};
use drivers::hal::display::SegmentDisplay;
use drivers::hal::gpio::{GpioInterrupts, GpioPort};
use drivers::hal::i2c::I2cError;
use drivers::hal::interrupt::{IntcError, StartMode, VectorId};
use drivers::hal::serial::InterruptSerial;
use drivers::hal::timer::CountingTimer;
use drivers::platform::{DeviceId, DeviceKind, Platform, PlatformError};
use log::{debug, info};
use thiserror::Error;

use crate::button::{self, ButtonLatch};
use crate::config::{BoardConfig, KEY_CHANNEL, LED_CHANNEL};
use crate::echo;
use crate::irq::Dispatcher;
use crate::sensor::{self, SensorLink};
use crate::sequencer::LedSequencer;

/// Why bring-up stopped. Every variant is fatal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    #[error("no {kind} with device id {id} in the hardware description")]
    ConfigLookup { kind: DeviceKind, id: DeviceId },
    #[error("{kind} {id} failed to initialise")]
    DriverInit { kind: DeviceKind, id: DeviceId },
    #[error("interrupt setup failed for vector {vector}")]
    InterruptSetup {
        vector: VectorId,
        #[source]
        source: IntcError,
    },
    #[error("interrupt controller did not start")]
    ControllerStart(#[source] IntcError),
    #[error("IIC target address {address:#x} rejected")]
    I2cAddress {
        address: u16,
        #[source]
        source: I2cError,
    },
}

impl From<PlatformError> for BootError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::ConfigNotFound { kind, id } => BootError::ConfigLookup { kind, id },
            PlatformError::InitFailed { kind, id } => BootError::DriverInit { kind, id },
        }
    }
}

fn driver_init<E>(kind: DeviceKind, id: DeviceId) -> impl FnOnce(E) -> BootError {
    move |_| BootError::DriverInit { kind, id }
}

fn interrupt_setup(vector: VectorId) -> impl FnOnce(IntcError) -> BootError {
    move |source| BootError::InterruptSetup { vector, source }
}

/// Outcome of one main-loop iteration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Poll {
    /// No press latched
    Idle,
    /// Press confirmed; `pattern` went to the LEDs
    Pressed { pattern: u32, counter: u8 },
    /// Press latched but the button read back released
    Released,
}

/// Everything the handlers and the main loop share.
pub struct Firmware<P: Platform> {
    dispatcher: Dispatcher<P::Intc, Self>,
    button: ButtonLatch,
    key: IrqSpinLock<P::Gpio, ArchIrq>,
    uart: IrqSpinLock<P::Uart, ArchIrq>,
    sensor: SensorLink<P::Iic>,
    sequencer: SpinLock<LedSequencer<P::Gpio>>,
    timer: P::Timer,
    hold_ms: u32,
}

impl<P: Platform> Firmware<P> {
    /// Bring up every peripheral and start the interrupt controller.
    ///
    /// Interrupts stay masked at the CPU until [`Firmware::install`].
    pub fn boot(platform: &mut P, config: &BoardConfig) -> Result<Self, BootError> {
        info!("This is a RISC-V soft-core system!");
        debug!("boot: platform {}", platform.name());

        let mut leds = platform.init_gpio(config.led_gpio)?;
        let led_err = || driver_init(DeviceKind::Gpio, config.led_gpio);
        leds.set_direction(LED_CHANNEL, 0).map_err(led_err())?;
        leds.write(LED_CHANNEL, config.led_initial)
            .map_err(led_err())?;

        let mut key = platform.init_gpio(config.key_gpio)?;
        let key_err = || driver_init(DeviceKind::Gpio, config.key_gpio);
        key.set_direction(KEY_CHANNEL, config.key_input_mask)
            .map_err(key_err())?;

        let mut uart = platform.init_uart(config.uart)?;

        let intc = platform.init_interrupt_controller(config.intc)?;
        let mut dispatcher = Dispatcher::new(intc);

        dispatcher
            .attach(config.uart_vector, Self::on_uart)
            .map_err(interrupt_setup(config.uart_vector))?;
        uart.enable_interrupt()
            .map_err(driver_init(DeviceKind::Uart, config.uart))?;

        dispatcher
            .attach(config.key_vector, Self::on_button)
            .map_err(interrupt_setup(config.key_vector))?;
        key.enable_interrupt(KEY_CHANNEL).map_err(key_err())?;
        key.enable_global_interrupt().map_err(key_err())?;

        let mut sensor = SensorLink::new(platform.init_iic(config.iic)?);
        sensor.set_receive_handler(sensor::receive_complete);
        sensor.set_status_handler(sensor::bus_status);
        sensor.set_send_handler(sensor::send_complete);
        dispatcher
            .attach(config.iic_vector, Self::on_iic)
            .map_err(interrupt_setup(config.iic_vector))?;
        sensor
            .set_target_address(config.sensor_address)
            .map_err(|source| BootError::I2cAddress {
                address: config.sensor_address,
                source,
            })?;

        dispatcher
            .start(StartMode::Real)
            .map_err(BootError::ControllerStart)?;
        debug!("boot: interrupt controller started");

        let mut display = platform.init_display(config.display)?;
        display
            .load(&config.display_pattern)
            .map_err(driver_init(DeviceKind::Display, config.display))?;

        Ok(Self {
            dispatcher,
            button: ButtonLatch::new(),
            key: IrqSpinLock::new(key),
            uart: IrqSpinLock::new(uart),
            sensor,
            sequencer: SpinLock::new(LedSequencer::new(leds)),
            timer: platform.timer(),
            hold_ms: config.hold_ms,
        })
    }

    /// Route the CPU's external interrupt here and unmask it.
    ///
    /// # Safety
    /// The platform's interrupt hook must call
    /// [`Firmware::on_external_interrupt`] on `self`.
    pub unsafe fn install(&'static self, platform: &mut P) {
        unsafe { platform.install_interrupt_handler() };
        debug!("boot: external interrupt unmasked");
    }

    /// Top-level interrupt routine.
    pub fn on_external_interrupt(&self) {
        self.dispatcher.dispatch(self);
    }

    fn on_button(&self) {
        self.key
            .with(|key| button::service(&self.button, key, KEY_CHANNEL));
    }

    fn on_uart(&self) {
        self.uart.with(|uart| {
            echo::echo_once(uart);
        });
    }

    fn on_iic(&self) {
        self.sensor.service();
    }

    /// One main-loop iteration.
    ///
    /// A latched press is confirmed by reading the button (pressed reads
    /// 0). A confirmed press lights the next LED and holds for the
    /// configured time. The latch is cleared at the end either way, which
    /// also drops a press latched during the hold.
    pub fn poll(&self) -> Poll {
        if !self.button.is_pending() {
            return Poll::Idle;
        }

        let pressed = matches!(self.key.with(|key| key.read(KEY_CHANNEL)), Ok(0));
        let result = if pressed {
            let step = self.sequencer.lock().advance();
            info!("i = {}", step.counter);
            self.timer.delay_ms(self.hold_ms);
            Poll::Pressed {
                pattern: step.pattern,
                counter: step.counter,
            }
        } else {
            Poll::Released
        };

        self.button.clear();
        result
    }

    pub fn run(&self) -> ! {
        loop {
            self.poll();
        }
    }

    pub fn button(&self) -> &ButtonLatch {
        &self.button
    }

    pub fn sensor(&self) -> &SensorLink<P::Iic> {
        &self.sensor
    }

    pub fn dispatcher(&self) -> &Dispatcher<P::Intc, Self> {
        &self.dispatcher
    }

    /// Sequence position of the next press.
    pub fn counter(&self) -> u8 {
        self.sequencer.lock().counter()
    }
}
