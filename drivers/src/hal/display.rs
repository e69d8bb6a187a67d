//! Register-mapped display Hardware Abstraction Layer.

/// Display errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DisplayError {
    /// Register index past the end of the block.
    InvalidRegister(usize),
}

/// A display driven by a small bank of write-only registers.
pub trait SegmentDisplay {
    /// Number of registers in the block.
    const REGISTERS: usize;

    fn write_register(&mut self, index: usize, value: u32) -> Result<(), DisplayError>;

    /// Write `values` to registers `0..values.len()` in order.
    fn load(&mut self, values: &[u32]) -> Result<(), DisplayError> {
        values
            .iter()
            .enumerate()
            .try_for_each(|(index, &value)| self.write_register(index, value))
    }
}
