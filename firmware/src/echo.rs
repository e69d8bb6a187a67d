//! UART echo handler.

use drivers::hal::serial::{InterruptSerial, UartStatus};

/// UART interrupt body: echo one received byte, if any.
///
/// No flow control: with a full transmitter the echoed byte is whatever the
/// UART does with it.
pub fn echo_once<U: InterruptSerial>(uart: &mut U) -> Option<u8> {
    if !uart.status().contains(UartStatus::RX_VALID) {
        return None;
    }
    let byte = uart.read_rx();
    uart.write_tx(byte);
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;
    use drivers::mock::MockUart;

    #[test]
    fn echoes_the_received_byte_unmodified() {
        let mut uart = MockUart::new();
        uart.receive(&[0xA5]);

        assert_eq!(echo_once(&mut uart), Some(0xA5));
        assert_eq!(uart.transmitted(), [0xA5]);
    }

    #[test]
    fn nothing_echoed_without_valid_data() {
        let mut uart = MockUart::new();

        assert_eq!(echo_once(&mut uart), None);
        assert!(uart.transmitted().is_empty());
    }

    #[test]
    fn one_byte_per_invocation() {
        let mut uart = MockUart::new();
        uart.receive(b"hi");

        echo_once(&mut uart);

        assert_eq!(uart.transmitted(), b"h");
        assert_eq!(uart.pending_rx(), 1);
    }
}
