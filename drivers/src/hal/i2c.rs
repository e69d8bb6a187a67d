//! I2C controller Hardware Abstraction Layer.
//!
//! Interrupt-driven controllers report what happened since the last service
//! call as [`I2cEvents`]; routing events to send/receive/status handlers is
//! left to the owner of the controller.

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Events latched by an I2C controller.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct I2cEvents: u32 {
        const ARBITRATION_LOST = 1 << 0;
        /// Target did not acknowledge.
        const TX_ERROR = 1 << 1;
        const TX_EMPTY = 1 << 2;
        const RX_FULL = 1 << 3;
        const BUS_NOT_BUSY = 1 << 4;
        const ADDRESSED_AS_TARGET = 1 << 5;
        const NOT_ADDRESSED = 1 << 6;
        const TX_HALF_EMPTY = 1 << 7;
    }
}

impl I2cEvents {
    /// Events that complete a send.
    pub const SENT: Self = Self::TX_EMPTY;
    /// Events that complete a receive.
    pub const RECEIVED: Self = Self::RX_FULL;
    /// Bus condition events reported to the status handler.
    pub const STATUS: Self = Self::ARBITRATION_LOST
        .union(Self::TX_ERROR)
        .union(Self::BUS_NOT_BUSY);
}

/// Which address register an address call targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressType {
    /// Address put on the bus when this controller initiates a transfer.
    Send,
    /// Address this controller answers to as a target.
    Respond,
}

/// I2C controller errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum I2cError {
    #[error("address {0:#x} does not fit 7 bits")]
    InvalidAddress(u16),
    #[error("controller reset did not complete")]
    ResetFailed,
}

/// I2C bus controller.
pub trait I2cController {
    /// Error type for controller operations.
    type Error: core::fmt::Debug;

    /// Program a 7-bit address.
    fn set_address(&mut self, kind: AddressType, address: u16) -> Result<(), Self::Error>;

    /// Address used for the next initiated transfer, if one was set.
    fn target_address(&self) -> Option<u16>;

    /// Read and acknowledge latched interrupt events.
    fn service_interrupt(&mut self) -> I2cEvents;
}

/// Validate a 7-bit address.
pub fn check_address(address: u16) -> Result<u8, I2cError> {
    u8::try_from(address)
        .ok()
        .filter(|a| *a <= 0x7F)
        .ok_or(I2cError::InvalidAddress(address))
}
