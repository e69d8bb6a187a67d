use super::params::{self, CPU_CLOCK_HZ};
use super::timer::McycleTimer;
use crate::peripheral::axi_gpio::AxiGpio;
use crate::peripheral::axi_iic::AxiIic;
use crate::peripheral::axi_intc::AxiIntc;
use crate::peripheral::seven_segment::SevenSegment;
use crate::peripheral::uartlite::UartLite;
use crate::platform::{DeviceId, DeviceKind, Platform, PlatformError, lookup_config};
use riscv::register::{mie, mstatus};

pub struct ArtyA7 {
    _private: (),
}

impl ArtyA7 {
    /// Claim the board.
    ///
    /// # Safety
    /// Call once. Every driver handed out assumes it is the only owner of
    /// its register block.
    pub const unsafe fn take() -> Self {
        Self { _private: () }
    }

    /// Transmit side of the console UART, for the logger.
    ///
    /// # Safety
    /// Shares the UART with whoever owns the receive side; only use it for
    /// non-blocking transmit.
    pub unsafe fn console_uart(&self) -> Result<UartLite, PlatformError> {
        let config = lookup_config(&params::UART_TABLE, params::UARTLITE_DEVICE_ID)?;
        Ok(unsafe { UartLite::new(config.base_address) })
    }
}

impl Platform for ArtyA7 {
    type Gpio = AxiGpio;
    type Uart = UartLite;
    type Intc = AxiIntc;
    type Iic = AxiIic;
    type Display = SevenSegment;
    type Timer = McycleTimer;

    fn name(&self) -> &'static str {
        "Arty A7 (RV32IMAC soft core)"
    }

    fn init_gpio(&mut self, id: DeviceId) -> Result<AxiGpio, PlatformError> {
        let config = lookup_config(&params::GPIO_TABLE, id)?;
        Ok(unsafe { AxiGpio::new(config.base_address, config.dual, config.interrupts) })
    }

    fn init_uart(&mut self, id: DeviceId) -> Result<UartLite, PlatformError> {
        let config = lookup_config(&params::UART_TABLE, id)?;
        let mut uart = unsafe { UartLite::new(config.base_address) };
        uart.initialize();
        Ok(uart)
    }

    fn init_interrupt_controller(&mut self, id: DeviceId) -> Result<AxiIntc, PlatformError> {
        let config = lookup_config(&params::INTC_TABLE, id)?;
        let mut intc = unsafe { AxiIntc::new(config.base_address) };
        intc.initialize();
        Ok(intc)
    }

    fn init_iic(&mut self, id: DeviceId) -> Result<AxiIic, PlatformError> {
        let config = lookup_config(&params::IIC_TABLE, id)?;
        let mut iic = unsafe { AxiIic::new(config.base_address) };
        iic.initialize().map_err(|_| PlatformError::InitFailed {
            kind: DeviceKind::Iic,
            id,
        })?;
        Ok(iic)
    }

    fn init_display(&mut self, id: DeviceId) -> Result<SevenSegment, PlatformError> {
        let config = lookup_config(&params::DISPLAY_TABLE, id)?;
        Ok(unsafe { SevenSegment::new(config.base_address) })
    }

    fn timer(&mut self) -> McycleTimer {
        McycleTimer::new(CPU_CLOCK_HZ)
    }

    unsafe fn install_interrupt_handler(&mut self) {
        // mtvec is set up by the runtime; external interrupts land in the
        // `MachineExternal` hook
        unsafe {
            mie::set_mext();
            mstatus::set_mie();
        }
    }
}
