//! Architecture support.
//!
//! [`ArchIrq`] is the [`IrqControl`](crate::sync::irq::IrqControl)
//! implementation for the build target. Host builds get a no-op so the
//! firmware logic can run under `cargo test`.

cfg_if::cfg_if! {
    if #[cfg(target_arch = "riscv32")] {
        pub mod riscv;
        pub use self::riscv::irq::RiscvIrq as ArchIrq;
        pub use self::riscv::wfi;
    } else {
        mod host;
        pub use host::HostIrq as ArchIrq;
        pub use host::wfi;
    }
}
