//! Interrupt Controller Hardware Abstraction Layer.
//!
//! This module defines platform-independent traits for interrupt management.

use thiserror::Error;

/// Interrupt vector number as known to the controller.
pub type VectorId = u8;

/// Number of inputs of a controller.
pub const MAX_VECTORS: usize = 32;

/// How the controller is started.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartMode {
    /// Only software-generated interrupts reach the CPU.
    Simulation,
    /// Hardware inputs reach the CPU.
    Real,
}

/// Interrupt controller errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum IntcError {
    #[error("vector {0} is out of range")]
    InvalidVector(VectorId),
    #[error("controller is already started")]
    AlreadyStarted,
}

/// Interrupt controller trait.
///
/// This trait represents the controller sitting between peripheral interrupt
/// lines and the CPU's single external interrupt input.
pub trait InterruptController {
    /// Error type for interrupt controller operations.
    type Error: core::fmt::Debug;

    /// Enable (unmask) an interrupt line.
    fn enable(&mut self, vector: VectorId) -> Result<(), Self::Error>;

    /// Drive the CPU interrupt output; nothing is delivered before this.
    fn start(&mut self, mode: StartMode) -> Result<(), Self::Error>;

    /// Mask of lines that are both raised and enabled.
    fn active(&self) -> u32;

    /// Acknowledge a serviced line.
    ///
    /// Level-sensitive inputs must be acknowledged after the peripheral
    /// dropped its request, i.e. after the handler ran.
    fn acknowledge(&mut self, vector: VectorId) -> Result<(), Self::Error>;
}

/// Check a vector number against [`MAX_VECTORS`].
pub fn check_vector(vector: VectorId) -> Result<u32, IntcError> {
    if (vector as usize) < MAX_VECTORS {
        Ok(1 << vector)
    } else {
        Err(IntcError::InvalidVector(vector))
    }
}
