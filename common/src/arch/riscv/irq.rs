use crate::sync::irq::IrqControl;
use ::riscv::register::mstatus;

/// Machine-mode interrupt masking through `mstatus.MIE`.
///
/// `State` is whether MIE was set before [`IrqControl::disable`], so nested
/// critical sections only unmask at the outermost level. Inside a trap
/// handler MIE is already clear (hardware moved it to MPIE), so locking from
/// a handler never unmasks early.
pub struct RiscvIrq;

impl IrqControl for RiscvIrq {
    type State = bool;

    #[inline(always)]
    fn disable() -> bool {
        let was_enabled = mstatus::read().mie();
        unsafe { mstatus::clear_mie() };
        was_enabled
    }

    #[inline(always)]
    fn restore(was_enabled: bool) {
        if was_enabled {
            unsafe { mstatus::set_mie() };
        }
    }
}
