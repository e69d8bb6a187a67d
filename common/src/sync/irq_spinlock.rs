use core::{
    cell::UnsafeCell,
    marker::PhantomData,
    sync::atomic::{AtomicBool, Ordering},
};

use super::irq::IrqControl;

/// Spinlock that masks hart interrupts for as long as it is held.
///
/// - Masks interrupts before spinning
/// - Restores the previous interrupt state on drop
///
/// Safe to take from both interrupt and thread context on a single hart:
/// thread code holding the lock cannot be preempted by a handler that wants
/// the same lock. Not fair. Not reentrant.
pub struct IrqSpinLock<T, I: IrqControl> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
    _irq: PhantomData<I>,
}

// SAFETY: access to `data` is serialised by `locked`
unsafe impl<T: Send, I: IrqControl> Send for IrqSpinLock<T, I> {}
unsafe impl<T: Send, I: IrqControl> Sync for IrqSpinLock<T, I> {}

impl<T, I: IrqControl> IrqSpinLock<T, I> {
    pub const fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
            _irq: PhantomData,
        }
    }

    /// Acquire the lock with interrupts masked.
    pub fn lock(&self) -> IrqSpinLockGuard<'_, T, I> {
        let irq_state = I::disable();

        while self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }

        IrqSpinLockGuard {
            lock: self,
            irq_state,
        }
    }

    /// Run `f` with the lock held and interrupts masked.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }
}

/// Guard returned by [`IrqSpinLock::lock`].
pub struct IrqSpinLockGuard<'a, T, I: IrqControl> {
    lock: &'a IrqSpinLock<T, I>,
    irq_state: I::State,
}

impl<T, I: IrqControl> core::ops::Deref for IrqSpinLockGuard<'_, T, I> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        // SAFETY: the lock is held, so we have exclusive access
        unsafe { &*self.lock.data.get() }
    }
}

impl<T, I: IrqControl> core::ops::DerefMut for IrqSpinLockGuard<'_, T, I> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: the lock is held, so we have exclusive access
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T, I: IrqControl> Drop for IrqSpinLockGuard<'_, T, I> {
    fn drop(&mut self) {
        // Release before unmasking so a pending handler finds the lock free
        self.lock.locked.store(false, Ordering::Release);
        I::restore(self.irq_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    std::thread_local! {
        static MASKED: Cell<bool> = const { Cell::new(false) };
        static RESTORES: Cell<u32> = const { Cell::new(0) };
    }

    struct FakeIrq;

    impl IrqControl for FakeIrq {
        type State = bool;

        fn disable() -> bool {
            MASKED.with(|m| m.replace(true))
        }

        fn restore(was_masked: bool) {
            RESTORES.with(|r| r.set(r.get() + 1));
            MASKED.with(|m| m.set(was_masked));
        }
    }

    #[test]
    fn masks_while_held_and_restores_previous_state() {
        let lock: IrqSpinLock<u8, FakeIrq> = IrqSpinLock::new(0);

        lock.with(|v| {
            *v = 7;
            assert!(MASKED.with(Cell::get));
        });

        assert!(!MASKED.with(Cell::get));
        assert_eq!(RESTORES.with(Cell::get), 1);
        assert_eq!(lock.with(|v| *v), 7);
        assert_eq!(RESTORES.with(Cell::get), 2);
    }

    #[test]
    fn nested_masking_keeps_outer_state() {
        let outer: IrqSpinLock<(), FakeIrq> = IrqSpinLock::new(());
        let inner: IrqSpinLock<(), FakeIrq> = IrqSpinLock::new(());

        let guard = outer.lock();
        drop(inner.lock());
        // inner restored "masked" because outer still holds
        assert!(MASKED.with(Cell::get));
        drop(guard);
        assert!(!MASKED.with(Cell::get));
    }
}
