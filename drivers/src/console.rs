//! Diagnostic console: a `log` backend on a serial port.
//!
//! Output is best-effort. Bytes the transmitter cannot take immediately are
//! dropped, so logging from the main loop or a handler never blocks.

use crate::hal::serial::{NonBlockingSerial, SerialWriter};
use common::arch::ArchIrq;
use common::sync::IrqSpinLock;
use core::fmt::Write;
use log::{LevelFilter, Metadata, Record};

pub struct ConsoleLogger<S> {
    port: IrqSpinLock<Option<S>, ArchIrq>,
    level: LevelFilter,
}

impl<S: NonBlockingSerial + Send> ConsoleLogger<S> {
    /// A logger with no port attached yet; records are discarded until
    /// [`ConsoleLogger::attach`].
    pub const fn new(level: LevelFilter) -> Self {
        Self {
            port: IrqSpinLock::new(None),
            level,
        }
    }

    pub fn attach(&self, port: S) {
        *self.port.lock() = Some(port);
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Write `s` as-is (LF becomes CRLF).
    pub fn write_str(&self, s: &str) {
        self.port.with(|port| {
            if let Some(port) = port {
                let _ = SerialWriter(port).write_str(s);
            }
        });
    }
}

impl<S: NonBlockingSerial + Send> log::Log for ConsoleLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.port.with(|port| {
            if let Some(port) = port {
                let _ = writeln!(SerialWriter(port), "[{}] {}", record.level(), record.args());
            }
        });
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockUart;
    use log::{Level, Log};
    use pretty_assertions::assert_eq;

    fn record<'a>(level: Level, args: core::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().level(level).args(args).build()
    }

    #[test]
    fn lines_are_prefixed_and_crlf_terminated() {
        let uart = MockUart::new();
        let logger = ConsoleLogger::new(LevelFilter::Info);
        logger.attach(uart.clone());

        logger.log(&record(Level::Info, format_args!("i = {}", 2)));

        assert_eq!(uart.transmitted_str(), "[INFO] i = 2\r\n");
    }

    #[test]
    fn records_above_the_level_are_dropped() {
        let uart = MockUart::new();
        let logger = ConsoleLogger::new(LevelFilter::Info);
        logger.attach(uart.clone());

        logger.log(&record(Level::Debug, format_args!("noise")));

        assert_eq!(uart.transmitted_str(), "");
    }

    #[test]
    fn full_transmitter_drops_instead_of_blocking() {
        let uart = MockUart::new();
        uart.set_tx_capacity(4);
        let logger = ConsoleLogger::new(LevelFilter::Trace);
        logger.attach(uart.clone());

        logger.write_str("abcdefgh");

        assert_eq!(uart.transmitted_str(), "abcd");
    }

    #[test]
    fn unattached_logger_is_silent() {
        let logger: ConsoleLogger<MockUart> = ConsoleLogger::new(LevelFilter::Info);
        logger.log(&record(Level::Error, format_args!("lost")));
        logger.write_str("lost");
    }
}
