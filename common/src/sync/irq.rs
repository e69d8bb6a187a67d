use core::fmt::Debug;

/// Architecture-specific interrupt masking interface.
///
/// Implemented once per target in [`crate::arch`].
pub trait IrqControl {
    /// Saved interrupt state
    type State: Copy + Debug;

    /// Mask interrupts on the current hart and return the previous state.
    fn disable() -> Self::State;

    /// Restore interrupts to a previous state.
    fn restore(state: Self::State);
}
