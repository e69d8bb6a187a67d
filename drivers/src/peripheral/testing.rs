//! In-memory stand-in for a memory-mapped register block.

use core::cell::UnsafeCell;
use core::ptr::{read_volatile, write_volatile};

/// `WORDS` 32-bit registers whose address serves as a driver base address.
pub struct FakeRegisters<const WORDS: usize> {
    words: UnsafeCell<[u32; WORDS]>,
}

impl<const WORDS: usize> FakeRegisters<WORDS> {
    pub fn new() -> Self {
        Self {
            words: UnsafeCell::new([0; WORDS]),
        }
    }

    pub fn base(&self) -> usize {
        self.words.get() as usize
    }

    pub fn read(&self, offset: usize) -> u32 {
        assert!(offset / 4 < WORDS, "offset {offset:#x} outside block");
        unsafe { read_volatile((self.base() + offset) as *const u32) }
    }

    pub fn write(&self, offset: usize, value: u32) {
        assert!(offset / 4 < WORDS, "offset {offset:#x} outside block");
        unsafe { write_volatile((self.base() + offset) as *mut u32, value) }
    }
}
