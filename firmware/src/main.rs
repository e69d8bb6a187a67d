#![no_std]
#![no_main]

use core::panic::PanicInfo;

use common::arch::wfi;
use drivers::console::ConsoleLogger;
use drivers::peripheral::uartlite::UartLite;
use drivers::platform::CurrentPlatform;
use firmware::{BoardConfig, Firmware};
use log::error;
use riscv_rt::entry;
use spin::Once;

static LOGGER: ConsoleLogger<UartLite> = ConsoleLogger::new(BoardConfig::ARTY_A7.log_level);
static FIRMWARE: Once<Firmware<CurrentPlatform>> = Once::new();

#[entry]
fn main() -> ! {
    let config = BoardConfig::ARTY_A7;
    let mut platform = unsafe { CurrentPlatform::take() };

    if let Ok(console) = unsafe { platform.console_uart() } {
        LOGGER.attach(console);
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LOGGER.level());
        }
    }

    let firmware = match FIRMWARE.try_call_once(|| Firmware::boot(&mut platform, &config)) {
        Ok(firmware) => firmware,
        Err(err) => {
            error!("boot failed: {}", err);
            halt();
        }
    };

    // SAFETY: `MachineExternal` dispatches through `FIRMWARE`
    unsafe { firmware.install(&mut platform) };
    firmware.run()
}

#[allow(non_snake_case)]
#[unsafe(no_mangle)]
extern "C" fn MachineExternal() {
    if let Some(firmware) = FIRMWARE.get() {
        firmware.on_external_interrupt();
    }
}

#[unsafe(export_name = "ExceptionHandler")]
fn exception_handler(_trap_frame: &riscv_rt::TrapFrame) -> ! {
    error!("unexpected exception");
    halt();
}

fn halt() -> ! {
    loop {
        wfi();
    }
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    error!("{}", info);
    halt();
}
