//! RISC-V (machine mode) support.

pub mod irq;

/// Wait for interrupt
///
/// Stalls the hart until an interrupt is pending, even with `mstatus.MIE`
/// clear.
#[inline(always)]
pub fn wfi() {
    #[allow(unused_unsafe)]
    unsafe {
        ::riscv::asm::wfi();
    }
}
