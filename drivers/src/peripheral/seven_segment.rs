//! Seven-segment display register block (custom AXI-Lite IP)
//!
//! Four write-only 32-bit slave registers at offsets 0x0..0xC; the fabric
//! logic turns them into segment drive.

use crate::hal::display::{DisplayError, SegmentDisplay};
use core::ptr::write_volatile;

/// Byte distance between slave registers
const REG_STRIDE: usize = 4;

#[derive(Debug)]
pub struct SevenSegment {
    base: usize,
}

impl SevenSegment {
    /// # Safety
    ///
    /// `base` must point to the display's mapped register block.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }
}

impl SegmentDisplay for SevenSegment {
    const REGISTERS: usize = 4;

    fn write_register(&mut self, index: usize, value: u32) -> Result<(), DisplayError> {
        if index >= Self::REGISTERS {
            return Err(DisplayError::InvalidRegister(index));
        }
        unsafe { write_volatile((self.base + index * REG_STRIDE) as *mut u32, value) };
        Ok(())
    }
}
