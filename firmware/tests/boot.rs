mod support;

use support::Board;
use drivers::Channel;
use drivers::hal::i2c::I2cError;
use drivers::hal::interrupt::{IntcError, StartMode};
use drivers::mock::{GpioOp, MockIic};
use drivers::platform::DeviceKind;
use firmware::BootError;
use pretty_assertions::assert_eq;

#[test]
fn leds_start_as_outputs_showing_ffff() {
    let board = Board::new();
    board.boot().unwrap();

    assert_eq!(
        board.leds.ops(),
        [
            GpioOp::SetDirection(Channel::One, 0),
            GpioOp::Write(Channel::One, 0xFFFF)
        ]
    );
}

#[test]
fn button_channel_is_an_input_with_interrupts_on() {
    let board = Board::new();
    board.boot().unwrap();

    assert_eq!(board.key.direction(Channel::One), 0x1);
    assert!(board.key.interrupt_enabled(Channel::One));
    assert!(board.key.global_interrupt_enabled());
}

#[test]
fn every_source_is_enabled_and_the_controller_runs_in_real_mode() {
    let board = Board::new();
    let firmware = board.boot().unwrap();
    let c = &board.config;

    for vector in [c.uart_vector, c.key_vector, c.iic_vector] {
        assert!(board.intc.is_enabled(vector), "vector {vector}");
        assert!(firmware.dispatcher().is_connected(vector));
    }
    assert_eq!(board.intc.started(), Some(StartMode::Real));
    assert!(board.uart.is_initialized());
    assert!(board.uart.interrupt_enabled());
}

#[test]
fn display_is_written_once_with_the_demo_pattern() {
    let board = Board::new();
    board.boot().unwrap();

    assert_eq!(board.display.writes(), [(0, 0), (1, 0), (2, 0), (3, 0xF)]);
}

#[test]
fn sensor_is_the_iic_target() {
    let board = Board::new();
    let firmware = board.boot().unwrap();

    assert_eq!(firmware.sensor().target_address(), Some(0x4B));
}

#[test]
fn boot_does_not_touch_the_cpu_interrupt_hook() {
    let board = Board::new();
    let mut platform = board.platform();
    firmware::Firmware::boot(&mut platform, &board.config).unwrap();

    assert_eq!(platform.installs(), 0);
}

#[test]
fn install_routes_the_cpu_interrupt() {
    let board = Board::new();
    let mut platform = board.platform();
    let firmware: &'static _ = Box::leak(Box::new(
        firmware::Firmware::boot(&mut platform, &board.config).unwrap(),
    ));

    unsafe { firmware.install(&mut platform) };

    assert_eq!(platform.installs(), 1);
}

#[test]
fn missing_device_is_a_config_lookup_failure() {
    let mut board = Board::new();
    board.config.uart = 9;

    assert_eq!(
        board.boot().err(),
        Some(BootError::ConfigLookup {
            kind: DeviceKind::Uart,
            id: 9
        })
    );
}

#[test]
fn iic_stuck_in_reset_is_a_driver_init_failure() {
    let mut board = Board::new();
    board.iic = MockIic::broken();

    assert_eq!(
        board.boot().err(),
        Some(BootError::DriverInit {
            kind: DeviceKind::Iic,
            id: board.config.iic
        })
    );
}

#[test]
fn button_port_without_interrupts_is_a_driver_init_failure() {
    let mut board = Board::new();
    board.key = drivers::mock::MockGpio::output_only();

    assert_eq!(
        board.boot().err(),
        Some(BootError::DriverInit {
            kind: DeviceKind::Gpio,
            id: board.config.key_gpio
        })
    );
}

#[test]
fn bad_vector_is_an_interrupt_setup_failure() {
    let mut board = Board::new();
    board.config.key_vector = 40;

    assert_eq!(
        board.boot().err(),
        Some(BootError::InterruptSetup {
            vector: 40,
            source: IntcError::InvalidVector(40)
        })
    );
    assert_eq!(board.intc.started(), None);
}

#[test]
fn ten_bit_sensor_address_aborts_boot() {
    let mut board = Board::new();
    board.config.sensor_address = 0x2FF;

    assert_eq!(
        board.boot().err(),
        Some(BootError::I2cAddress {
            address: 0x2FF,
            source: I2cError::InvalidAddress(0x2FF)
        })
    );
}

#[test]
fn boot_errors_render_for_the_console() {
    let err = BootError::ConfigLookup {
        kind: DeviceKind::Gpio,
        id: 1,
    };
    assert_eq!(
        err.to_string(),
        "no GPIO with device id 1 in the hardware description"
    );
}
