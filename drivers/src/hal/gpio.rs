//! GPIO (General Purpose Input/Output) Hardware Abstraction Layer.
//!
//! Ports are addressed by channel and driven a whole word at a time, the way
//! soft-core GPIO blocks expose them: one data register and one direction
//! register per channel.

/// A channel of a GPIO port.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    One,
    Two,
}

impl Channel {
    /// Bit of this channel in the channel-indexed interrupt registers.
    pub const fn mask(self) -> u32 {
        match self {
            Channel::One => 0b01,
            Channel::Two => 0b10,
        }
    }
}

/// GPIO errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// Channel two was used on a single-channel port.
    InvalidChannel,
    /// The port was synthesised without interrupt support.
    NoInterrupts,
}

/// Word-wide GPIO port.
pub trait GpioPort {
    /// Error type for GPIO operations.
    type Error: core::fmt::Debug;

    /// Set the direction of every line on `channel`.
    ///
    /// A `1` bit in `input_mask` makes that line an input, `0` an output.
    fn set_direction(&mut self, channel: Channel, input_mask: u32) -> Result<(), Self::Error>;

    /// Drive the output lines of `channel`.
    fn write(&mut self, channel: Channel, value: u32) -> Result<(), Self::Error>;

    /// Sample all lines of `channel`.
    fn read(&self, channel: Channel) -> Result<u32, Self::Error>;
}

/// Extension trait for GPIO ports that can raise an interrupt on input change.
pub trait GpioInterrupts: GpioPort {
    /// Unmask the per-channel interrupt.
    fn enable_interrupt(&mut self, channel: Channel) -> Result<(), Self::Error>;

    /// Mask the per-channel interrupt.
    fn disable_interrupt(&mut self, channel: Channel) -> Result<(), Self::Error>;

    /// Acknowledge a latched interrupt on `channel`.
    fn clear_interrupt(&mut self, channel: Channel) -> Result<(), Self::Error>;

    /// Let the port drive its interrupt output at all.
    fn enable_global_interrupt(&mut self) -> Result<(), Self::Error>;

    /// Channel mask of latched interrupts.
    fn interrupt_status(&self) -> u32;
}
