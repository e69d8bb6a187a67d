use crate::sync::irq::IrqControl;

/// Interrupt "masking" for host builds, where nothing preempts.
pub struct HostIrq;

impl IrqControl for HostIrq {
    type State = ();

    #[inline(always)]
    fn disable() {}

    #[inline(always)]
    fn restore(_state: ()) {}
}

#[inline(always)]
pub fn wfi() {
    core::hint::spin_loop();
}
