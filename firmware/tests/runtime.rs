mod support;

use support::Board;
use drivers::Channel;
use drivers::hal::i2c::I2cEvents;
use drivers::hal::interrupt::InterruptController;
use drivers::mock::{GpioOp, MockPlatform};
use firmware::{Firmware, Poll};
use pretty_assertions::assert_eq;

#[test]
fn idle_iterations_touch_nothing() {
    let board = Board::new();
    let firmware = board.running();

    for _ in 0..10 {
        assert_eq!(firmware.poll(), Poll::Idle);
    }

    assert!(board.leds.ops().is_empty());
    assert!(board.key.ops().is_empty());
    assert!(!firmware.button().is_pending());
    assert!(board.timer.delays_ms().is_empty());
}

#[test]
fn press_lights_the_first_led_and_holds_one_second() {
    let board = Board::new();
    let firmware = board.running();

    board.press_edge();
    firmware.on_external_interrupt();
    assert!(firmware.button().is_pending());

    assert_eq!(
        firmware.poll(),
        Poll::Pressed {
            pattern: 0x1,
            counter: 0
        }
    );
    assert_eq!(board.leds.writes(Channel::One), [0x1]);
    assert_eq!(firmware.counter(), 1);
    assert_eq!(board.timer.delays_ms(), [1000]);
    assert!(!firmware.button().is_pending());
}

#[test]
fn press_during_the_hold_is_dropped() {
    let board = Board::new();
    let firmware: &'static Firmware<MockPlatform> = Box::leak(Box::new(board.running()));

    let key = board.key.clone();
    let intc = board.intc.clone();
    let vector = board.config.key_vector;
    board.timer.on_delay(move || {
        key.raise_interrupt(Channel::One);
        intc.raise(vector);
        firmware.on_external_interrupt();
    });

    board.press_edge();
    firmware.on_external_interrupt();
    board.key.clear_ops();

    assert_eq!(
        firmware.poll(),
        Poll::Pressed {
            pattern: 0x1,
            counter: 0
        }
    );
    assert!(board.key.ops().contains(&GpioOp::DisableInterrupt(Channel::One)));
    assert_eq!(board.intc.acknowledged(), [vector, vector]);
    assert_eq!(board.leds.writes(Channel::One), [0x1]);
    assert!(!firmware.button().is_pending());

    assert_eq!(firmware.poll(), Poll::Idle);
    assert_eq!(board.leds.writes(Channel::One), [0x1]);
    assert_eq!(firmware.counter(), 1);
}

#[test]
fn five_presses_walk_the_leds_and_wrap() {
    let board = Board::new();
    let firmware = board.running();

    for _ in 0..5 {
        board.press_edge();
        firmware.on_external_interrupt();
        firmware.poll();
    }

    assert_eq!(
        board.leds.writes(Channel::One),
        [0x1, 0x2, 0x4, 0x8, 0x1]
    );
    assert_eq!(firmware.counter(), 1);
}

#[test]
fn noise_clears_the_latch_without_an_led_write() {
    let board = Board::new();
    let firmware = board.running();
    board.key.set_input(Channel::One, 0x1);

    board.press_edge();
    firmware.on_external_interrupt();

    assert_eq!(firmware.poll(), Poll::Released);
    assert!(board.leds.writes(Channel::One).is_empty());
    assert_eq!(firmware.counter(), 0);
    assert!(!firmware.button().is_pending());
    assert!(board.timer.delays_ms().is_empty());
}

#[test]
fn one_press_is_serviced_once_however_late_it_is_seen() {
    let board = Board::new();
    let firmware = board.running();

    board.press_edge();
    firmware.on_external_interrupt();
    board.press_edge();
    firmware.on_external_interrupt();

    let serviced = (0..6)
        .filter(|_| matches!(firmware.poll(), Poll::Pressed { .. }))
        .count();

    assert_eq!(serviced, 1);
    assert_eq!(board.leds.writes(Channel::One), [0x1]);
}

#[test]
fn button_handler_brackets_the_status_clear() {
    let board = Board::new();
    let firmware = board.running();

    board.press_edge();
    firmware.on_external_interrupt();

    assert_eq!(
        board.key.ops(),
        [
            GpioOp::DisableInterrupt(Channel::One),
            GpioOp::ClearInterrupt(Channel::One),
            GpioOp::EnableInterrupt(Channel::One),
        ]
    );
    assert!(board.key.interrupt_enabled(Channel::One));
    assert!(!board.key.interrupt_latched(Channel::One));
    assert_eq!(board.intc.acknowledged(), [board.config.key_vector]);
}

#[test]
fn received_byte_is_echoed() {
    let board = Board::new();
    let firmware = board.running();

    board.uart_byte(0x41);
    firmware.on_external_interrupt();

    assert_eq!(board.uart.transmitted(), [0x41]);
    assert_eq!(board.intc.acknowledged(), [board.config.uart_vector]);
}

#[test]
fn uart_interrupt_without_data_echoes_nothing() {
    let board = Board::new();
    let firmware = board.running();

    board.intc.raise(board.config.uart_vector);
    firmware.on_external_interrupt();

    assert!(board.uart.transmitted().is_empty());
}

#[test]
fn simultaneous_sources_are_each_handled_once() {
    let board = Board::new();
    let firmware = board.running();

    board.uart_byte(b'x');
    board.press_edge();
    firmware.on_external_interrupt();

    assert_eq!(board.uart.transmitted(), b"x");
    assert!(firmware.button().is_pending());
    assert_eq!(
        board.intc.acknowledged(),
        [board.config.uart_vector, board.config.key_vector]
    );
    assert_eq!(firmware.dispatcher().unhandled(), 0);
}

#[test]
fn iic_interrupt_reaches_the_completion_handlers() {
    let board = Board::new();
    let firmware = board.running();
    let state = firmware.sensor().state();
    state.begin_transmit();
    state.begin_receive();

    board.iic.latch(I2cEvents::TX_EMPTY | I2cEvents::RX_FULL);
    board.intc.raise(board.config.iic_vector);
    firmware.on_external_interrupt();

    assert!(!state.transmit_pending());
    assert!(!state.receive_pending());
}

#[test]
fn stray_vector_is_acknowledged_and_counted() {
    let board = Board::new();
    let firmware = board.running();
    let mut intc = board.intc.clone();
    intc.enable(9).unwrap();

    intc.raise(9);
    firmware.on_external_interrupt();

    assert_eq!(firmware.dispatcher().unhandled(), 1);
    assert_eq!(board.intc.acknowledged(), [9]);
}
